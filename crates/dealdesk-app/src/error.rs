//! # App Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in DealDesk                               │
//! │                                                                         │
//! │  Frontend                    Session Layer                              │
//! │  ────────                    ─────────────                              │
//! │                                                                         │
//! │  saveOffer(draft)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ── ValidationError ─────────┐                │  │
//! │  │         │                                       │                │  │
//! │  │         ▼                                       ▼                │  │
//! │  │  Server rejection? ── ClientError::Api ────── AppError ────────►│  │
//! │  │         │              (message verbatim)                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await saveOffer(draft)                                               │
//! │  } catch (e) {                                                          │
//! │    // e.message = "title is required"                                   │
//! │    // e.code = "VALIDATION_ERROR"                                       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use dealdesk_client::ClientError;
use dealdesk_core::{CoreError, ValidationError};

/// Error returned from dashboard commands.
///
/// ## Serialization
/// This is what the frontend receives when a command fails:
/// ```json
/// {
///   "code": "API_REJECTED",
///   "message": "Offer cannot move from accepted to draft"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404 from the backend)
    NotFound,

    /// Input validation failed before anything was sent
    ValidationError,

    /// The local lifecycle table does not offer this move
    InvalidTransition,

    /// The backend rejected the request; message is the server's wording
    ApiRejected,

    /// The backend could not be reached
    Network,

    /// The API client is misconfigured
    Config,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts validation errors to app errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransition { .. } => {
                AppError::new(ErrorCode::InvalidTransition, err.to_string())
            }
            CoreError::Validation(v) => v.into(),
            other => AppError::new(ErrorCode::ValidationError, other.to_string()),
        }
    }
}

/// Converts client errors to app errors.
///
/// Server rejections keep the backend's message verbatim; transport
/// problems collapse into a Network code with a readable message.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status: 404, message } => {
                AppError::new(ErrorCode::NotFound, message)
            }
            ClientError::Api { message, .. } => AppError::new(ErrorCode::ApiRejected, message),
            ClientError::ConnectionFailed(_)
            | ClientError::Timeout
            | ClientError::RequestFailed(_) => {
                AppError::new(ErrorCode::Network, err.to_string())
            }
            e if e.is_config_error() => AppError::new(ErrorCode::Config, e.to_string()),
            other => AppError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_rejection_kept_verbatim() {
        let err: AppError = ClientError::Api {
            status: 422,
            message: "Offer cannot move from accepted to draft".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ApiRejected);
        assert_eq!(err.message, "Offer cannot move from accepted to draft");
    }

    #[test]
    fn test_not_found_mapping() {
        let err: AppError = ClientError::Api {
            status: 404,
            message: "Offer not found".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_transport_maps_to_network() {
        let err: AppError = ClientError::Timeout.into();
        assert_eq!(err.code, ErrorCode::Network);
    }

    #[test]
    fn test_serialized_shape() {
        let err = AppError::validation("title is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "title is required");
    }
}
