//! Bridge error types.

use thiserror::Error;

/// Errors raised at the bridge boundary itself.
///
/// Service failures never show up here: the controller turns them into a
/// `SummarizeResult::Failure` before they cross back.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The payload is outside the declared request shape.
    #[error("invalid bridge payload: {reason}")]
    InvalidPayload { reason: String },

    /// The channel to the controller is gone or returned garbage.
    #[error("bridge transport failed: {reason}")]
    Transport { reason: String },
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::InvalidPayload {
            reason: e.to_string(),
        }
    }
}
