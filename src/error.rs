use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// A single violated form constraint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// User input failed declared constraints. Recoverable: form handlers
    /// re-render with the messages, comment/rating handlers turn it into an
    /// error flash.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
    #[error("file storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(crate::templates::not_found_page().into_string()))
                    .into_response()
            }
            AppError::Validation(errors) => {
                // Handlers intercept validation before it gets this far, so
                // anything left is a request assembled outside our forms.
                let detail =
                    errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
                (StatusCode::BAD_REQUEST, Html(crate::templates::error_page(&detail).into_string()))
                    .into_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database failure");
                server_error()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "poster storage failure");
                server_error()
            }
        }
    }
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(crate::templates::error_page("Something went wrong. Please try again.").into_string()),
    )
        .into_response()
}

pub type AppResult<T> = Result<T, AppError>;
