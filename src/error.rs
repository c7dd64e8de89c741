//!
//! # Error Handling
//!
//! This module defines the application-wide error type `AppError`, a tagged
//! enum of error kinds that is matched exhaustively at the response-formatting
//! boundary. Each variant maps to one HTTP status code and a JSON body of the
//! shape `{"message": ...}` (validation errors additionally carry the field
//! errors under `"errors"`).
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers and
//! middleware can return it directly with `?`. `From` impls are provided for
//! `sqlx::Error`, `validator::ValidationErrors`, and `bcrypt::BcryptError`.
//!
//! Server-side failures (`Internal`, `Database`) are logged in full and
//! rendered to the client as a generic message; details never leave the
//! process.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Input failed validation (HTTP 400). Carries the structured per-field
    /// errors produced by the `validator` crate.
    Validation(ValidationErrors),
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// A requested resource was not found (HTTP 404).
    NotFound(String),
    /// The request conflicts with existing state, e.g. a duplicate email
    /// on registration (HTTP 409).
    Conflict(String),
    /// An unexpected server-side failure (HTTP 500).
    Internal(String),
    /// A failure originating from the database layer (HTTP 500).
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "message": "validation failed",
                "errors": errors
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "message": msg
            })),
            // 500-class details are logged server-side only; clients get a
            // generic message.
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "internal server error"
                }))
            }
            AppError::Database(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; everything else is a `Database` error.
/// Unique-constraint violations are mapped closer to the call site, where the
/// conflicting resource is known.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::Validation(errors)
    }
}

/// Hashing failures are programmer/environment errors, never expected flow.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}
