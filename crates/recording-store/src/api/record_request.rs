use crate::api::ApiError;

use serde::Deserialize;

/// Body of `POST /api/record`.
///
/// The body may be empty, `{}` or carry `"duration": null`; all mean the
/// configured default.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct RecordRequest {
    /// Seconds to capture.
    #[serde(default)]
    pub duration: Option<f64>,
}

impl RecordRequest {
    /// Parses a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
    }
}
