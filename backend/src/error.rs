//! Error types of the print service.
//!
//! Admission rejections (busy, no ink, not enough papers) are not errors:
//! they are answered with a regular `{success: false, message}` body. The
//! variants here are the unexpected failures, and every one of them is
//! rendered as the same JSON shape with a 4xx/5xx status.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::jobs::PrintOutcome;
use thiserror::Error;

/// An external command (spooler, converter, rasterizer, mailer) failed.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The spooler state is unknown; the request must not proceed.
    #[error("Could not query the printer: {0}")]
    SpoolerQuery(#[source] CommandError),

    #[error("Could not prepare the document ({stage}): {source}")]
    Transform {
        stage: &'static str,
        #[source]
        source: CommandError,
    },

    #[error("Could not send the document to the printer: {0}")]
    Spool(#[source] CommandError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    BadRequest(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(PrintOutcome::rejected(self.to_string()))
    }
}
