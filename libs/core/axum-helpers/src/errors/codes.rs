//! Error codes attached to error logs.
//!
//! Clients only ever see `{"error": "<message>"}`; the codes exist so that
//! operators can group and alert on failures in structured logs.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Conflict;
//! assert_eq!(code.as_str(), "CONFLICT");
//! assert_eq!(code.code(), 1003);
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Missing or invalid input
    BadRequest,

    /// No resource at the requested location
    NotFound,

    /// Resource already exists
    Conflict,

    // Server errors (2000-2999)
    /// Anything unanticipated, including handler panics
    InternalError,

    /// Document store failure
    StoreError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StoreError => "STORE_ERROR",
        }
    }

    /// Integer code for logs and metrics.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1001,
            Self::NotFound => 1002,
            Self::Conflict => 1003,
            Self::InternalError => 2001,
            Self::StoreError => 2002,
        }
    }

    /// Message returned to clients when the error carries none of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::NotFound => "Not found",
            Self::Conflict => "Resource already exists",
            Self::InternalError | Self::StoreError => "Internal server error",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.code() >= 2000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_share_generic_message() {
        for code in [
            ErrorCode::InternalError,
            ErrorCode::StoreError,
        ] {
            assert!(code.is_server_error());
            assert_eq!(code.default_message(), "Internal server error");
        }
    }

    #[test]
    fn test_client_codes_are_not_server_errors() {
        assert!(!ErrorCode::BadRequest.is_server_error());
        assert!(!ErrorCode::NotFound.is_server_error());
        assert!(!ErrorCode::Conflict.is_server_error());
    }

    #[test]
    fn test_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::StoreError).unwrap();
        assert_eq!(json, "\"STORE_ERROR\"");
        assert_eq!(ErrorCode::StoreError.to_string(), "STORE_ERROR");
    }
}
