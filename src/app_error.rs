use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::StorageError;
use crate::response::{json_error_code, ErrorCode};

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn code(&self) -> ErrorCode {
        if self.0.downcast_ref::<StorageError>().is_some() {
            ErrorCode::StorageError
        } else {
            ErrorCode::InternalError
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!("request failed: {:#}", self.0);
        let code = self.code();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json_error_code(format!("Internal server error: {}", self.0), code),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn storage_failures_get_their_own_code() {
        let err = AppError::from(StorageError::Io {
            name: "x_50.jpg".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert!(matches!(err.code(), ErrorCode::StorageError));

        let err = AppError::from(anyhow::anyhow!("worker panicked"));
        assert!(matches!(err.code(), ErrorCode::InternalError));
    }
}
