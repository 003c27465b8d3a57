use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::ErrorCode;

/// The unified error type for the telemetry aggregator
#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Dataset error: {message}")]
    Dataset {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Server error: {message}")]
    Server {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Aggregation error: {message}")]
    Aggregation {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AggregatorError {
    /// Create a configuration error with specific code and path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a dataset error with specific code and path
    pub fn dataset_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Dataset {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a request validation error with specific code
    pub fn validation_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a server error with specific code
    pub fn server(code: u16, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an error raised while computing region statistics
    pub fn aggregation(code: u16, message: impl Into<String>) -> Self {
        Self::Aggregation {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Dataset { source: src, .. }
            | Self::Validation { source: src, .. }
            | Self::Server { source: src, .. }
            | Self::Aggregation { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Dataset { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. }
            | Self::Aggregation { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the process exit code for this error.
    ///
    /// Request-scoped errors never end the process and share the generic code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Dataset { .. } => 3,
            Self::Server { .. } => 4,
            Self::Validation { .. } | Self::Aggregation { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Dataset { code, .. }
            | Self::Validation { code, .. }
            | Self::Server { code, .. }
            | Self::Aggregation { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Dataset { message, .. } => format!("Telemetry dataset unusable: {}", message),
            Self::Validation { message, .. } => message.clone(),
            Self::Server { message, .. } => format!("Server error: {}", message),
            Self::Aggregation { message, .. } => format!("Aggregation failed: {}", message),
        }
    }

    /// HTTP status used when this error reaches a client
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { code, .. } => match *code {
                ErrorCode::VALIDATION_MALFORMED_BODY => StatusCode::BAD_REQUEST,
                ErrorCode::VALIDATION_UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Type alias for Results using AggregatorError
pub type Result<T> = std::result::Result<T, AggregatorError>;

impl From<JsonRejection> for AggregatorError {
    fn from(rejection: JsonRejection) -> Self {
        let code = match &rejection {
            JsonRejection::JsonDataError(_) => ErrorCode::VALIDATION_INVALID_FIELD,
            JsonRejection::JsonSyntaxError(_) => ErrorCode::VALIDATION_MALFORMED_BODY,
            JsonRejection::MissingJsonContentType(_) => {
                ErrorCode::VALIDATION_UNSUPPORTED_MEDIA_TYPE
            }
            _ => ErrorCode::VALIDATION_MALFORMED_BODY,
        };
        AggregatorError::validation_with_code(code, rejection.body_text())
    }
}

impl IntoResponse for AggregatorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "detail": self.user_message(),
            "code": self.code(),
        }));
        (status, body).into_response()
    }
}
