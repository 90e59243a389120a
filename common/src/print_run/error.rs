use thiserror::Error;

/// Message shown when a sheet never finished printing.
pub const TIMEOUT_MESSAGE: &str =
    "Printer timed out! Printer could be out of paper or ink. Please try again later";

/// Why a print run stopped. Every variant ends the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// A backend or upload-service call did not complete.
    #[error("{0}")]
    Transport(String),

    /// The upload service could not describe the document.
    #[error("{0}")]
    Document(String),

    /// The backend refused the sheet (busy, no ink, not enough papers, ...).
    #[error("{0}")]
    Rejected(String),

    /// The printer stayed busy past the per-sheet deadline.
    #[error("{}", TIMEOUT_MESSAGE)]
    TimedOut,

    /// The sheet printed but the upload service did not record it.
    #[error("Page printed but could not be recorded: {0}")]
    Confirmation(String),
}
