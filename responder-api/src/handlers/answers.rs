use super::body::parse_body;
use crate::error::{ApiError, ApiResult};
use crate::store::{QuestionStore, StoreError};
use crate::validation::{validate, ValidationOptions, ANSWER_SCHEMA};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use responder_types::CreateAnswerRequest;
use tracing::{error, info, warn};

#[get("/questions/{question_id}/answers")]
pub async fn list_answers(
    question_id: web::Path<String>,
    store: web::Data<QuestionStore>,
) -> ApiResult<HttpResponse> {
    let id = question_id.into_inner();

    match store.get_answers(&id).await {
        Some(answers) => Ok(HttpResponse::Ok().json(answers)),
        None => {
            warn!(question_id = %id, "Question not found");
            Err(ApiError::QuestionNotFound)
        }
    }
}

#[post("/questions/{question_id}/answers")]
pub async fn create_answer(
    req: HttpRequest,
    question_id: web::Path<String>,
    body: web::Bytes,
    store: web::Data<QuestionStore>,
    options: web::Data<ValidationOptions>,
) -> ApiResult<HttpResponse> {
    let id = question_id.into_inner();
    let request: CreateAnswerRequest =
        validate(parse_body(&req, &body)?, &ANSWER_SCHEMA, **options)?;

    let answer = store
        .add_answer(&id, request.into())
        .await
        .map_err(|e| {
            match e {
                StoreError::QuestionNotFound => warn!(question_id = %id, "Question not found"),
                _ => error!(error = %e, question_id = %id, "Failed to store answer"),
            }
            e
        })?;

    info!(question_id = %id, answer_id = %answer.id, "Answer created");

    Ok(HttpResponse::Ok().json(answer))
}

#[get("/questions/{question_id}/answers/{answer_id}")]
pub async fn get_answer(
    path: web::Path<(String, String)>,
    store: web::Data<QuestionStore>,
) -> ApiResult<HttpResponse> {
    let (question_id, answer_id) = path.into_inner();

    let answer = store.get_answer(&question_id, &answer_id).await.map_err(|e| {
        warn!(question_id = %question_id, "Question not found");
        e
    })?;

    match answer {
        Some(answer) => Ok(HttpResponse::Ok().json(answer)),
        None => {
            warn!(question_id = %question_id, answer_id = %answer_id, "Answer not found");
            Err(ApiError::AnswerNotFound)
        }
    }
}
