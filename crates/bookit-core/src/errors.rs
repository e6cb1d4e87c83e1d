//! Application error type and its conversion into HTTP responses.
//!
//! Every service returns `Result<T, AppError>`. The error carries an
//! [`ErrorKind`] that decides the status code, the underlying
//! [`anyhow::Error`], and for validation failures a map of field messages.
//!
//! Response bodies:
//!
//! | Kind | Status | Body |
//! |------|--------|------|
//! | `ValidationFailed` | 400 | `{"errors": {"field": ["message"]}}` |
//! | `BadRequest` | 400 | `{"error": "..."}` |
//! | `InvalidCredentials` | 401 | `{"error": "Invalid credentials"}` |
//! | `Unauthenticated` | 401 | `{"error": "..."}` |
//! | `Forbidden` | 403 | `{"error": "..."}` |
//! | `NotFound` | 404 | `{"error": "..."}` |
//! | `Internal` | 500 | `{"error": "<operation>", "message": "<cause>"}` |

use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Field name to list of human readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    BadRequest,
    InvalidCredentials,
    Unauthenticated,
    Forbidden,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ValidationFailed | ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidCredentials | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    pub fields: FieldErrors,
    context: Option<String>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            fields: FieldErrors::new(),
            context: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(ErrorKind::Internal, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message))
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            anyhow::anyhow!("Invalid credentials"),
        )
    }

    pub fn validation(fields: FieldErrors) -> Self {
        Self {
            kind: ErrorKind::ValidationFailed,
            error: anyhow::anyhow!("The given data was invalid."),
            fields,
            context: None,
        }
    }

    /// Builds a `ValidationFailed` error from `validator` output, keeping the
    /// per-field messages declared on the DTO.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        Self::validation(collect_field_errors(errors))
    }

    /// Names the operation that failed. Only internal errors use it: their
    /// body reports this text as `error` and the underlying cause as `message`.
    pub fn context(mut self, operation: &str) -> Self {
        if self.kind == ErrorKind::Internal && self.context.is_none() {
            self.context = Some(operation.to_string());
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

/// Flattens `validator` errors into field messages, falling back to a generic
/// message for rules declared without one.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errors) in errors.field_errors() {
        let messages = fields.entry(field.to_string()).or_default();
        for error in errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| format!("The {} field is invalid.", field));
            messages.push(message);
        }
    }
    fields
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self.kind {
            ErrorKind::ValidationFailed => json!({ "errors": self.fields }),
            ErrorKind::Internal => {
                tracing::error!(
                    error = %self.error,
                    operation = self.context.as_deref().unwrap_or("unknown"),
                    "Request failed"
                );
                match &self.context {
                    Some(operation) => json!({
                        "error": operation,
                        "message": self.error.to_string(),
                    }),
                    None => json!({ "error": self.error.to_string() }),
                }
            }
            _ => json!({ "error": self.error.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
