//! Handler error type and its mapping to HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use quill_core::error::RepoError;
use quill_core::ports::SessionError;

/// Page-level error type that converts to plain HTML error responses.
#[derive(Debug)]
pub enum PageError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Forbidden,
    Internal(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PageError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            PageError::Unauthorized => write!(f, "Unauthorized"),
            PageError::Forbidden => write!(f, "Forbidden"),
            PageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Unauthorized => StatusCode::UNAUTHORIZED,
            PageError::Forbidden => StatusCode::FORBIDDEN,
            PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let detail = match self {
            PageError::NotFound(detail) => detail.clone(),
            PageError::BadRequest(detail) => detail.clone(),
            PageError::Unauthorized => "A valid session is required.".to_string(),
            PageError::Forbidden => "You may only change your own posts.".to_string(),
            PageError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "Something went wrong on our side.".to_string()
            }
        };

        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(error_page(status, &detail))
    }
}

/// Minimal static error page; the template engine is not available here.
fn error_page(status: StatusCode, detail: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{status}</title></head>\n\
         <body><h1>{status}</h1><p>{detail}</p><p><a href=\"/\">Back to posts</a></p></body>\n</html>\n"
    )
}

// Conversion from repository errors
impl From<RepoError> for PageError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => PageError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => PageError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                PageError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                PageError::Internal("Database error".to_string())
            }
        }
    }
}

// Conversion from session validation errors
impl From<SessionError> for PageError {
    fn from(err: SessionError) -> Self {
        tracing::debug!(error = %err, "rejected requester");
        PageError::Unauthorized
    }
}

/// Result type alias for handlers.
pub type PageResult<T> = Result<T, PageError>;
