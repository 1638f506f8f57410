use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::error_response;
use thiserror::Error;

/// Failure classifications a [`ProductService`](crate::ProductService) may return.
///
/// The set is closed; anything a collaborator cannot classify goes into
/// [`ProductError::Internal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("authentication failed")]
    AuthFailed,

    #[error("access token has expired")]
    ExpiredToken,

    #[error("invalid input: {0}")]
    BadParamInput(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("product {0} not found")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// HTTP status for this classification.
    pub fn status(&self) -> StatusCode {
        match self {
            ProductError::AuthFailed | ProductError::ExpiredToken => StatusCode::UNAUTHORIZED,
            ProductError::BadParamInput(_) => StatusCode::BAD_REQUEST,
            // Conflicts are answered with 200, not 409.
            ProductError::Conflict(_) => StatusCode::OK,
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map the outcome of a service call to the status written to the client.
pub fn response_status(error: Option<&ProductError>) -> StatusCode {
    match error {
        None => StatusCode::OK,
        Some(err) => err.status(),
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}
