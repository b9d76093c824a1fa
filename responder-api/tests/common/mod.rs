#![allow(dead_code)]

use actix_web::{test, web, App};
use responder_api::routes::configure_routes;
use responder_api::store::QuestionStore;
use responder_api::validation::ValidationOptions;
use responder_types::{Answer, Question};
use std::io::Write;
use tempfile::NamedTempFile;

pub const QUESTION_ID: &str = "50f9e662-fa0e-4ec7-b53b-7845e8f821c3";
pub const ANSWER_ID: &str = "ce7bddfb-0544-4b14-92d8-188b03c41ee4";

pub struct TestApp<S> {
    pub store: web::Data<QuestionStore>,
    pub storage_file: NamedTempFile,
    pub app: S,
}

pub fn seed_questions() -> Vec<Question> {
    vec![
        Question {
            id: QUESTION_ID.to_string(),
            author: "Jack London".to_string(),
            summary: "What is my name?".to_string(),
            answers: vec![Answer {
                id: ANSWER_ID.to_string(),
                author: "test".to_string(),
                summary: "test".to_string(),
            }],
        },
        Question {
            id: "0e1aa0c9-3e52-4c5a-9b8f-1f4a8e4d7e2b".to_string(),
            author: "Tim Doods".to_string(),
            summary: "Who are you?".to_string(),
            answers: Vec::new(),
        },
    ]
}

pub fn write_storage_file(questions: &[Question]) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(serde_json::to_string(questions)?.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub async fn setup_test_app() -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    setup_test_app_with_options(ValidationOptions::default()).await
}

pub async fn setup_test_app_with_options(
    options: ValidationOptions,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let storage_file = write_storage_file(&seed_questions())?;
    let store = web::Data::new(QuestionStore::open_file(storage_file.path()).await?);

    let app = test::init_service(
        App::new()
            .app_data(store.clone())
            .app_data(web::Data::new(options))
            .configure(configure_routes),
    )
    .await;

    Ok(TestApp {
        store,
        storage_file,
        app,
    })
}

pub fn read_storage_file(file: &NamedTempFile) -> anyhow::Result<Vec<Question>> {
    let content = std::fs::read_to_string(file.path())?;
    Ok(serde_json::from_str(&content)?)
}
