use serde::Serialize;

/// Plain acknowledgment body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: &'static str,
}
