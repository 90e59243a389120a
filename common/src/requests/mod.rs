use crate::model::layout::{ColorMode, PagesPerSheet};
use serde::{Deserialize, Serialize};

/// Multipart field names of `POST /api/print`.
pub mod fields {
    pub const PDF: &str = "pdf";
    pub const PAGE: &str = "page";
    pub const TOTAL: &str = "total";
    pub const TOTAL_PAGES: &str = "total_pages";
    pub const NPPS: &str = "npps";
    pub const COLOR: &str = "color";
    pub const COPIES: &str = "copies";
}

/// One page-print submission.
///
/// The whole source PDF travels with every request; `page` selects the
/// sheet to print once the layout has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintRequest {
    /// 1-based sheet number within the batch.
    pub page: u32,
    /// Sheets in the whole batch (`ceil(pages / npps)`).
    pub total_pages: u32,
    /// Sheets still needed for the rest of the batch, copies included.
    pub total: u32,
    pub npps: PagesPerSheet,
    pub color: ColorMode,
    pub copies: u32,
    pub pdf: Vec<u8>,
}

impl PrintRequest {
    /// Text fields of the multipart form, in submission order.
    pub fn form_fields(&self) -> [(&'static str, String); 6] {
        [
            (fields::PAGE, self.page.to_string()),
            (fields::TOTAL, self.total.to_string()),
            (fields::TOTAL_PAGES, self.total_pages.to_string()),
            (fields::NPPS, self.npps.to_string()),
            (fields::COLOR, self.color.to_string()),
            (fields::COPIES, self.copies.to_string()),
        ]
    }
}

/// Confirmation sent to the upload service once a sheet has printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmPage {
    pub upload: String,
    pub page: u32,
    pub hash: String,
}

impl ConfirmPage {
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("upload", self.upload.clone()),
            ("page", self.page.to_string()),
            ("hash", self.hash.clone()),
        ]
    }
}
