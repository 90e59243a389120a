//! # Print Submission Service
//!
//! Handles `POST /api/print`, the only route that touches the printer.
//!
//! ## Workflow:
//!
//! 1.  **Form parsing**: `read_request` drains the multipart body. Text
//!     fields (`page`, `total`, `total_pages`, `npps`, `color`, `copies`)
//!     are collected by name and the `pdf` part is buffered in memory. A
//!     missing or malformed field is a `400 Bad Request`.
//!
//! 2.  **Admission**: the `AdmissionGate` checks exclusivity, the spooler
//!     queue, ink (when enabled) and paper for `total` sheets. A rejection
//!     is answered with `200 {success: false, message}`.
//!
//! 3.  **Transformation**: the `TransformChain` writes the upload to the
//!     scratch directory and applies the grayscale and imposition stages the
//!     request asks for, then renders the preview.
//!
//! 4.  **Spooling**: the `Dispatcher` submits the sheet, deletes the file and
//!     books the paper. The admission is released only after this step.

use crate::admission::Decision;
use crate::error::ServiceError;
use crate::state::KioskState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::jobs::PrintOutcome;
use common::model::layout::{ColorMode, PagesPerSheet};
use common::requests::{fields, PrintRequest};
use futures_util::StreamExt;
use std::collections::HashMap;
use std::str::FromStr;

pub(crate) async fn process(
    state: web::Data<KioskState>,
    payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let request = read_request(payload).await?;
    let outcome = submit(&state, &request).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Admits, prepares and spools one sheet.
pub async fn submit(
    state: &KioskState,
    request: &PrintRequest,
) -> Result<PrintOutcome, ServiceError> {
    let admission = match state.gate.admit(request.total).await? {
        Decision::Admitted(admission) => admission,
        Decision::Rejected(rejection) => return Ok(PrintOutcome::rejected(rejection.message())),
    };

    let job = state.chain.prepare(request).await?;
    let outcome = state.dispatcher.spool(job, request).await?;

    drop(admission);
    Ok(outcome)
}

/// Reads the multipart form into a `PrintRequest`.
async fn read_request(mut payload: Multipart) -> Result<PrintRequest, ServiceError> {
    let mut text: HashMap<String, String> = HashMap::new();
    let mut pdf: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(bad_request)?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(bad_request)?);
        }

        if name == fields::PDF {
            pdf = Some(bytes);
        } else if !name.is_empty() {
            let value = String::from_utf8(bytes)
                .map_err(|_| ServiceError::BadRequest(format!("{name} is not valid UTF-8")))?;
            text.insert(name, value);
        }
    }

    let pdf = pdf
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ServiceError::BadRequest("Missing pdf".to_string()))?;

    let request = PrintRequest {
        page: required(&text, fields::PAGE)?,
        total_pages: required(&text, fields::TOTAL_PAGES)?,
        total: required(&text, fields::TOTAL)?,
        npps: required::<PagesPerSheet>(&text, fields::NPPS)?,
        color: text
            .get(fields::COLOR)
            .and_then(|value| value.parse::<ColorMode>().ok())
            .unwrap_or_default(),
        copies: required(&text, fields::COPIES)?,
        pdf,
    };

    if request.page == 0 {
        return Err(ServiceError::BadRequest("page must be at least 1".to_string()));
    }
    if request.copies == 0 {
        return Err(ServiceError::BadRequest("copies must be at least 1".to_string()));
    }
    Ok(request)
}

fn required<T: FromStr>(text: &HashMap<String, String>, name: &str) -> Result<T, ServiceError> {
    let value = text
        .get(name)
        .ok_or_else(|| ServiceError::BadRequest(format!("Missing {name}")))?;
    value
        .trim()
        .parse()
        .map_err(|_| ServiceError::BadRequest(format!("Invalid {name}: {value:?}")))
}

fn bad_request(e: actix_multipart::MultipartError) -> ServiceError {
    ServiceError::BadRequest(e.to_string())
}
