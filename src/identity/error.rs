//! Identity service errors and their machine-readable codes.

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Error classes reported by the identity service
///
/// ZITADEL reports gRPC status codes, also through its HTTP gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    AlreadyExists,
    FailedPrecondition,
    NotFound,
    InvalidArgument,
    PermissionDenied,
    Unauthenticated,
    Unavailable,
    Internal,
    Unknown,
}

impl ErrorCode {
    /// Map a gRPC status code number
    #[must_use]
    pub fn from_grpc(code: i64) -> Self {
        match code {
            3 => Self::InvalidArgument,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            9 => Self::FailedPrecondition,
            13 => Self::Internal,
            14 => Self::Unavailable,
            16 => Self::Unauthenticated,
            _ => Self::Unknown,
        }
    }

    /// Best-effort mapping for error bodies that carry no gRPC code
    #[must_use]
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidArgument,
            StatusCode::UNAUTHORIZED => Self::Unauthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::PRECONDITION_FAILED => Self::FailedPrecondition,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => Self::Unavailable,
            s if s.is_server_error() => Self::Internal,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AlreadyExists => "already exists",
            Self::FailedPrecondition => "failed precondition",
            Self::NotFound => "not found",
            Self::InvalidArgument => "invalid argument",
            Self::PermissionDenied => "permission denied",
            Self::Unauthenticated => "unauthenticated",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("{operation} failed ({code}): {message}")]
    Api {
        operation: &'static str,
        code: ErrorCode,
        message: String,
    },
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned an unexpected response: {reason}")]
    InvalidResponse {
        operation: &'static str,
        reason: String,
    },
}

impl IdentityError {
    pub fn api(operation: &'static str, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            operation,
            code,
            message: message.into(),
        }
    }

    /// Code reported by the service, `None` when the call never got an answer
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Transport { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Message reported by the service
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. } => message,
            Self::InvalidResponse { reason, .. } => reason,
            Self::Transport { .. } => "",
        }
    }
}
