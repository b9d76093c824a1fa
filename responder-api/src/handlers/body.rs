//! Request body decoding for the POST endpoints.
//!
//! JSON and url-encoded form bodies are both accepted. Any other content
//! type, or none at all, reads as an empty object so the schema reports
//! the missing fields.

use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpMessage, HttpRequest};
use serde_json::{Map, Value};

pub fn parse_body(req: &HttpRequest, payload: &[u8]) -> ApiResult<Value> {
    let Some(mime) = req.mime_type().ok().flatten() else {
        return Ok(Value::Object(Map::new()));
    };

    let is_json = mime.subtype() == "json" || mime.suffix().is_some_and(|s| s == "json");
    let is_form = mime.type_() == "application" && mime.subtype() == "x-www-form-urlencoded";

    if is_json {
        serde_json::from_slice(payload).map_err(|e| ApiError::BadRequest(e.to_string()))
    } else if is_form {
        parse_form(payload)
    } else {
        Ok(Value::Object(Map::new()))
    }
}

fn parse_form(payload: &[u8]) -> ApiResult<Value> {
    let encoded = std::str::from_utf8(payload).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let fields = web::Query::<Map<String, Value>>::from_query(encoded)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Value::Object(fields.into_inner()))
}
