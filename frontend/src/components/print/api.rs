//! Browser implementations of the print-run seams.
//!
//! - `HttpBackend` talks to the kiosk backend under `/api/print`.
//! - `HttpUploadService` talks to the upload service that owns documents.
//! - `GlooTimer` sleeps with `gloo-timers`.
//!
//! Both base URLs are fixed at build time through `KIOSK_BACKEND_API` and
//! `KIOSK_SERVER_API`; when unset, requests go to the page's own origin.

use common::jobs::{CancelResult, PrintOutcome, PrinterStatus};
use common::model::document::DocumentEnvelope;
use common::print_run::{PrintBackend, RunError, Timer, UploadService};
use common::requests::{fields, ConfirmPage, PrintRequest};
use gloo_net::http::{Request, Response};
use js_sys::{Array, Uint8Array};
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys::{Blob, FormData};

const BACKEND_API: &str = match option_env!("KIOSK_BACKEND_API") {
    Some(url) => url,
    None => "",
};

const SERVER_API: &str = match option_env!("KIOSK_SERVER_API") {
    Some(url) => url,
    None => "",
};

fn transport(e: gloo_net::Error) -> RunError {
    RunError::Transport(e.to_string())
}

fn js_error(e: JsValue) -> RunError {
    RunError::Transport(format!("{:?}", e))
}

fn ensure_ok(resp: Response, what: &str) -> Result<Response, RunError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(RunError::Transport(format!(
            "{} answered {} {}",
            what,
            resp.status(),
            resp.status_text()
        )))
    }
}

#[derive(Debug, Default, Clone)]
pub struct HttpBackend;

impl HttpBackend {
    fn url() -> String {
        format!("{}/api/print", BACKEND_API)
    }

    fn form(request: &PrintRequest) -> Result<FormData, RunError> {
        let form = FormData::new().map_err(js_error)?;
        for (name, value) in request.form_fields() {
            form.append_with_str(name, &value).map_err(js_error)?;
        }

        let parts = Array::new();
        parts.push(&Uint8Array::from(request.pdf.as_slice()));
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
        form.append_with_blob_and_filename(fields::PDF, &blob, "document.pdf")
            .map_err(js_error)?;
        Ok(form)
    }
}

impl PrintBackend for HttpBackend {
    async fn submit(&self, request: &PrintRequest) -> Result<PrintOutcome, RunError> {
        let form = Self::form(request)?;
        // Rejections and server errors share the `{success, message}` body.
        Request::post(&Self::url())
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?
            .json::<PrintOutcome>()
            .await
            .map_err(transport)
    }

    async fn is_printing(&self) -> Result<bool, RunError> {
        let status = Request::get(&Self::url())
            .query([("t", js_sys::Date::now().to_string())])
            .send()
            .await
            .map_err(transport)?
            .json::<PrinterStatus>()
            .await
            .map_err(transport)?;
        if !status.success {
            return Err(RunError::Transport("Printer status unavailable".to_string()));
        }
        Ok(status.printing)
    }

    async fn cancel_all(&self) -> Result<(), RunError> {
        let result = Request::delete(&Self::url())
            .send()
            .await
            .map_err(transport)?
            .json::<CancelResult>()
            .await
            .map_err(transport)?;
        if !result.success {
            return Err(RunError::Transport("Could not cancel the print queue".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct HttpUploadService;

impl UploadService for HttpUploadService {
    async fn document(&self, upload: &str) -> Result<DocumentEnvelope, RunError> {
        Request::get(&format!("{}/api/document.php", SERVER_API))
            .query([("upload", upload)])
            .send()
            .await
            .map_err(transport)?
            .json::<DocumentEnvelope>()
            .await
            .map_err(|e| RunError::Document(e.to_string()))
    }

    async fn pdf(&self, upload: &str) -> Result<Vec<u8>, RunError> {
        let resp = Request::get(&format!("{}/print.php", SERVER_API))
            .query([("upload", upload)])
            .send()
            .await
            .map_err(transport)?;
        ensure_ok(resp, "The upload service")?
            .binary()
            .await
            .map_err(transport)
    }

    async fn confirm(&self, confirmation: &ConfirmPage) -> Result<(), RunError> {
        let resp = Request::get(&format!("{}/printed.php", SERVER_API))
            .query(confirmation.query_pairs())
            .send()
            .await
            .map_err(transport)?;
        ensure_ok(resp, "The upload service")?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
