//! Route table shared by the server binary and the integration tests.

use crate::handlers::{answers, questions, root};
use actix_web::web;

/// Registers every endpoint plus the fallback for unknown paths.
///
/// The caller provides the `QuestionStore` and `ValidationOptions` app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(root::welcome)
        .service(questions::list_questions)
        .service(questions::create_question)
        .service(questions::get_question)
        .service(answers::list_answers)
        .service(answers::create_answer)
        .service(answers::get_answer)
        .default_service(web::to(root::not_found));
}
