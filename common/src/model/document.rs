use crate::model::layout::{ColorMode, PagesPerSheet};
use serde::{Deserialize, Serialize};

/// Descriptor of an uploaded document, as reported by the upload service.
///
/// The print run reads it once when it starts and never refreshes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    /// Number of source pages in the PDF.
    pub pages: u32,
    pub copies: u32,
    pub npps: PagesPerSheet,
    pub color: ColorMode,
    /// Sheets already printed and confirmed; a run resumes from here.
    #[serde(default)]
    pub printed: u32,
}

impl Document {
    /// Number of physical print submissions needed for one copy.
    pub fn total_pages(&self) -> u32 {
        self.npps.sheets_for(self.pages)
    }
}

/// Envelope returned by the document metadata endpoint: `{success, message?, ...Document}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub document: Option<Document>,
}
