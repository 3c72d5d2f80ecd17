use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set to a non-default value in production")]
    InsecureSecret,
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Session store unavailable: {0}")]
    SessionStore(String),
    #[error("Failed to sign session token: {0}")]
    SessionToken(String),
    #[error("Question source unavailable")]
    RngPoisoned,
}

impl ResponseError for QuizError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Quiz error: {}", self);
        HttpResponse::InternalServerError().body("Internal Server Error")
    }
}
