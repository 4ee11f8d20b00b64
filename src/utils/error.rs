use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";
pub const BILL_NOT_FOUND_MESSAGE: &str = "Bill not found";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Every failure a handler can produce. Mapped to a status code in one place
/// (`ResponseError`); the detail strings are only ever logged.
#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    BillNotFound,
    MissingEmail,
    InvalidId(String),
    InvalidDocument(String),
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::BillNotFound => write!(f, "Not found: bill"),
            AppError::MissingEmail => write!(f, "Invalid request: email is required"),
            AppError::InvalidId(id) => write!(f, "Invalid id: {}", id),
            AppError::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BillNotFound => StatusCode::NOT_FOUND,
            AppError::MissingEmail => StatusCode::BAD_REQUEST,
            AppError::InvalidId(_) | AppError::InvalidDocument(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized => UNAUTHORIZED_MESSAGE,
            AppError::BillNotFound => BILL_NOT_FOUND_MESSAGE,
            AppError::MissingEmail => EMAIL_REQUIRED_MESSAGE,
            _ => {
                return HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body(INTERNAL_ERROR_BODY)
            }
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "message": message }))
    }
}
