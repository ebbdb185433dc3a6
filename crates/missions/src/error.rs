//! Error types for the mission service client.
//!
//! One variant per failure class, so the presentation layer can react
//! differently to a dead network than to a server-side rejection.

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a well-formed GraphQL envelope.
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server processed the request but rejected the operation.
    #[error("server rejected the operation: {0}")]
    Server(String),

    /// The input was rejected client-side; no request was issued.
    #[error("{0}")]
    Validation(String),
}

/// Coarse classification of an [`ApiError`], cheap to carry across
/// channels where the error itself cannot be cloned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server,
    Decode,
    Validation,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::Status(_) => ErrorKind::Network,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Server(_) => ErrorKind::Server,
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Server("title must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "server rejected the operation: title must not be empty"
        );

        let err = ApiError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("502"));

        let err = ApiError::Validation("launch date is required".to_string());
        assert_eq!(err.to_string(), "launch date is required");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR).kind(),
            ErrorKind::Network
        );
        assert_eq!(ApiError::Server("no".into()).kind(), ErrorKind::Server);
        assert_eq!(ApiError::Validation("no".into()).kind(), ErrorKind::Validation);

        let decode = serde_json::from_str::<serde_json::Value>("{")
            .map_err(ApiError::Decode)
            .unwrap_err();
        assert_eq!(decode.kind(), ErrorKind::Decode);
    }
}
