use crate::error::{ApiError, ApiResult};
use actix_web::{get, HttpRequest, HttpResponse, Responder};
use responder_types::WelcomeResponse;
use tracing::debug;

#[get("/")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(WelcomeResponse::new())
}

/// Fallback for every path no route matches.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    debug!(method = %req.method(), path = %req.path(), "No route matched");
    Err(ApiError::NotFound)
}
