use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::model::leave_request::LeaveStatus;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Leave request {id} is already {status}")]
    InvalidState { id: i64, status: LeaveStatus },

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LedgerError {
    pub fn employee_not_found(id: i64) -> Self {
        LedgerError::NotFound {
            entity: "Employee",
            id,
        }
    }

    pub fn request_not_found(id: i64) -> Self {
        LedgerError::NotFound {
            entity: "Leave request",
            id,
        }
    }
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::InvalidState { .. } | LedgerError::Duplicate(_) => StatusCode::CONFLICT,
            LedgerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LedgerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LedgerError::Database(e) = self {
            tracing::error!(error = %e, "Ledger database failure");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
