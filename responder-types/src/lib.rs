use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod question;
pub mod typescript_gen;

pub use question::{Answer, CreateAnswerRequest, CreateQuestionRequest, Question};
pub use typescript_gen::{generate_typescript_definitions, API_TYPE_NAMES};

// Response bodies shared by the responder API and its clients

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body used when a request fails for more than one reason at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorsResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WelcomeResponse {
    pub message: String,
}

impl WelcomeResponse {
    pub fn new() -> Self {
        Self {
            message: "Welcome to responder!".to_string(),
        }
    }
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self::new()
    }
}
