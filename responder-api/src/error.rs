use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use responder_types::{ErrorResponse, ErrorsResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", .0.join(". "))]
    Validation(Vec<String>),

    #[error("Question not found")]
    QuestionNotFound,

    #[error("Answer not found")]
    AnswerNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::QuestionNotFound
            | ApiError::AnswerNotFound
            | ApiError::BadRequest(_)
            | ApiError::Store(StoreError::QuestionNotFound) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        match self {
            ApiError::Validation(messages) if messages.len() > 1 => response.json(ErrorsResponse {
                errors: messages.clone(),
            }),
            // Paths and OS errors stay in the server log
            ApiError::Store(e) if !matches!(e, StoreError::QuestionNotFound) => {
                response.json(ErrorResponse {
                    error: "Internal server error".to_string(),
                })
            }
            _ => response.json(ErrorResponse {
                error: self.to_string(),
            }),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
