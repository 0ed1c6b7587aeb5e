use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(db_err) => match db_err {
                DbError::ConnectionConfigError(_) => {
                    tracing::error!(error = ?db_err, "Database is not configured.");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Database configuration is incomplete".to_string(),
                    )
                }
                DbError::ConnectionError(_) | DbError::ConnectTimeout(_) => {
                    tracing::error!(error = ?db_err, "Database is unreachable.");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Unable to connect to the database".to_string(),
                    )
                }
                DbError::PersistenceError(cause) => {
                    tracing::error!(error = ?cause, "Purchase could not be recorded.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Purchase failed: {cause}"),
                    )
                }
                other => {
                    tracing::error!(error = ?other, "Database error.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal database error occurred".to_string(),
                    )
                }
            },
            AppError::Validation(core_err) => {
                tracing::warn!(error = %core_err, "Request rejected by validation.");
                (StatusCode::UNPROCESSABLE_ENTITY, core_err.to_string())
            }
            AppError::MalformedBody(json_err) => {
                tracing::warn!(error = %json_err, "Request body rejected.");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Malformed request body: {json_err}"),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
