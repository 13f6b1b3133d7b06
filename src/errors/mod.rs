use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// A save wrote no row although the row is still present.
    #[error("Concurrency Conflict: {0}")]
    ConcurrencyConflict(String),
    #[error("Database Error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        AppError::NotFound(format!("{entity} with id {id} not found"))
    }

    pub fn id_mismatch(path_id: i32, body_id: i32) -> Self {
        AppError::BadRequest(format!(
            "Route id {path_id} does not match body id {body_id}"
        ))
    }

    /// Resolves a save that wrote no row. A row that has since disappeared
    /// is reported as missing; one that is still there is a real conflict.
    pub fn stale_write(entity: &str, id: i32, still_exists: bool) -> Self {
        if still_exists {
            AppError::ConcurrencyConflict(format!(
                "{entity} with id {id} was modified by another request"
            ))
        } else {
            AppError::not_found(entity, id)
        }
    }
}

/// True when the store rejected a write because a referenced row is missing.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConcurrencyConflict(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::ConcurrencyConflict(msg) => {
                error!("{}", msg);
                msg.clone()
            }
            AppError::DatabaseError(err) => {
                error!("Database error: {}", err);
                "An internal error occurred".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_write_on_missing_row_is_not_found() {
        let err = AppError::stale_write("Department", 4, false);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not Found: Department with id 4 not found");
    }

    #[test]
    fn stale_write_on_present_row_is_server_error() {
        let err = AppError::stale_write("Employee", 9, true);
        assert!(matches!(err, AppError::ConcurrencyConflict(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn id_mismatch_is_bad_request() {
        let err = AppError::id_mismatch(1, 2);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_hide_details() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
    }
}
