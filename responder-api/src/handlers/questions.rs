use super::body::parse_body;
use crate::error::{ApiError, ApiResult};
use crate::store::QuestionStore;
use crate::validation::{validate, ValidationOptions, QUESTION_SCHEMA};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use responder_types::CreateQuestionRequest;
use tracing::{error, info, warn};

#[get("/questions")]
pub async fn list_questions(store: web::Data<QuestionStore>) -> impl Responder {
    let questions = store.list().await;
    HttpResponse::Ok().json(questions)
}

#[get("/questions/{question_id}")]
pub async fn get_question(
    question_id: web::Path<String>,
    store: web::Data<QuestionStore>,
) -> ApiResult<HttpResponse> {
    let id = question_id.into_inner();

    match store.get_by_id(&id).await {
        Some(question) => Ok(HttpResponse::Ok().json(question)),
        None => {
            warn!(question_id = %id, "Question not found");
            Err(ApiError::QuestionNotFound)
        }
    }
}

#[post("/questions")]
pub async fn create_question(
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<QuestionStore>,
    options: web::Data<ValidationOptions>,
) -> ApiResult<HttpResponse> {
    let request: CreateQuestionRequest =
        validate(parse_body(&req, &body)?, &QUESTION_SCHEMA, **options)?;

    let question = store.add(request.into()).await.map_err(|e| {
        error!(error = %e, "Failed to store question");
        e
    })?;

    info!(
        question_id = %question.id,
        answer_count = question.answers.len(),
        "Question created"
    );

    Ok(HttpResponse::Ok().json(question))
}
