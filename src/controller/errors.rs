//! Controller error types.
//!
//! These never cross the bridge as errors: the controller renders them into
//! `SummarizeResult::Failure { error }` using their `Display` text.

use thiserror::Error;

/// Failures of the outbound call to the embedding service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never got a response (connection refused, DNS, timeout).
    #[error("embedding service unreachable at {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },

    /// The service answered with a non-2xx status.
    ///
    /// `status_text` is the registered reason phrase for the code. The
    /// phrase the server actually sent is not available from the client,
    /// so a code with no registered phrase (e.g. 599) gives empty text, the
    /// same as a browser over HTTP/2.
    #[error("Python service error: {status_text}")]
    Status { status: u16, status_text: String },

    /// The body was not JSON or lacked a numeric `embedding` array.
    #[error("malformed embedding response: {reason}")]
    Decode { reason: String },
}

impl ServiceError {
    /// HTTP status, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_uses_status_text() {
        let err = ServiceError::Status {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "Python service error: Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_decode_has_no_status() {
        let err = ServiceError::Decode {
            reason: "missing field `embedding`".into(),
        };
        assert!(err.status().is_none());
        assert!(err.to_string().contains("embedding"));
    }
}
