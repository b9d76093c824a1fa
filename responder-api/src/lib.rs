pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod store;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use store::{NewAnswer, NewQuestion, QuestionStore, StoreError};
