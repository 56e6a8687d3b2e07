// HTTP error responses
// Decision: Fixed, generic HTML bodies; details go to the log, never to the client

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use cannanote_core::CannaError;
use thiserror::Error;

/// Error returned by handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] CannaError),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                CannaError::NotFound(_) => StatusCode::NOT_FOUND,
                CannaError::Validation(_)
                | CannaError::UserNotFound
                | CannaError::InvalidCredentials => StatusCode::BAD_REQUEST,
                CannaError::DuplicateUsername(_) => StatusCode::CONFLICT,
                CannaError::Store(_) | CannaError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::Domain(CannaError::NotFound(_)) => "Not found",
            ApiError::Domain(CannaError::Validation(_)) => "Invalid input",
            ApiError::Domain(CannaError::UserNotFound | CannaError::InvalidCredentials) => {
                "Invalid username or password"
            }
            ApiError::Domain(CannaError::DuplicateUsername(_)) => "Username is not available",
            _ => "Something went wrong",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = format!(
            "<!DOCTYPE html><html><head><title>CannaNote</title></head>\
             <body><h1>{}</h1><p><a href=\"/\">Home</a></p></body></html>",
            self.public_message()
        );
        (status, Html(body)).into_response()
    }
}
