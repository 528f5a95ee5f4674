//! Error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// Generic failure payload: `{"error": "...", "details": "..."}`.
///
/// `details` is omitted when there is nothing safe to add; store failures in
/// particular surface only the generic message, with the diagnostic logged
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
