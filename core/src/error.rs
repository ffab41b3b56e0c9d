//! Error type for the trip planner client.
//!
//! # Design
//! Every variant renders as exactly the resolved, human-readable message, so
//! callers that only print the error see one string. The variant and the
//! `status` field keep the structured context for callers that want it.

use thiserror::Error;

/// Errors returned by `ApiClient` operations and `TripPlannerClient` parsers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request did not complete within the configured timeout.
    #[error("{message}")]
    Timeout { message: String },

    /// The request was sent but no response arrived.
    #[error("{message}")]
    Network { message: String },

    /// The request could not be built (bad payload, bad URL).
    #[error("{message}")]
    Request { message: String },

    /// A 2xx body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Status { message, .. }
            | ApiError::Timeout { message }
            | ApiError::Network { message }
            | ApiError::Request { message }
            | ApiError::Decode { message } => message,
        }
    }

    /// HTTP status of the failed response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}
