use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A reply to a [`Question`]. Ids are unique only within the parent question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub id: String,
    pub author: String,
    pub summary: String,
}

/// A question together with every answer posted to it, in insertion order.
///
/// This is also the shape persisted in the backing file, so files edited by
/// hand may omit `answers`; it then defaults to an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub author: String,
    pub summary: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn find_answer(&self, answer_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.id == answer_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateAnswerRequest {
    pub author: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateQuestionRequest {
    pub author: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub answers: Option<Vec<CreateAnswerRequest>>,
}
