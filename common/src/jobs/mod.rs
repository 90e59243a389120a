use serde::{Deserialize, Serialize};

/// Answer of `GET /api/print`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrinterStatus {
    pub success: bool,
    pub printing: bool,
}

/// Answer of `DELETE /api/print`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CancelResult {
    pub success: bool,
}

/// Answer of `POST /api/print`, also used for every failed backend call.
///
/// Accepted jobs carry `hash` and `preview`; rejected or failed ones carry
/// `message`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrintOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// MD5 hex digest of the uploaded PDF bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// `data:image/jpeg;base64,...` rendering of the printed sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl PrintOutcome {
    pub fn accepted(hash: String, preview: String) -> Self {
        Self {
            success: true,
            message: None,
            hash: Some(hash),
            preview: Some(preview),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            hash: None,
            preview: None,
        }
    }
}
