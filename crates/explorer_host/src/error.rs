//! Error taxonomy for storage-service calls.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure raised by a [`crate::StorageService`] call or by client-side input validation.
///
/// Every variant is handled at the control that initiated the call; none is retried.
pub enum StorageError {
    /// The service could not be reached (network failure, CORS rejection, aborted fetch).
    #[error("storage service unreachable: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("storage service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, possibly empty.
        body: String,
    },
    /// The service answered successfully but the payload did not match the expected shape.
    #[error("unexpected storage service payload: {0}")]
    Decode(String),
    /// User-supplied input was rejected before any network call.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The active host has no storage transport (non-browser builds, no-op adapters).
    #[error("storage service unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Returns `true` when the service was reached but refused the request.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Returns the HTTP status for [`StorageError::Status`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_expose_their_code() {
        let err = StorageError::Status {
            status: 404,
            body: "File not found".to_string(),
        };
        assert!(err.is_status());
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "storage service returned status 404: File not found"
        );

        let transport = StorageError::Transport("connection refused".to_string());
        assert!(!transport.is_status());
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn json_errors_map_to_decode_failures() {
        let err = serde_json::from_str::<Vec<u8>>("{").expect_err("invalid json");
        assert!(matches!(StorageError::from(err), StorageError::Decode(_)));
    }
}
