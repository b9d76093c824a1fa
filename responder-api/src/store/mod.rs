//! The question repository.
//!
//! [`QuestionStore`] keeps the whole collection in memory and rewrites it
//! through a [`QuestionBackend`] after every mutation. Mutations hold the
//! collection lock across the write, so writers within one process are
//! serialized and a failed write rolls the in-memory change back.

mod json_file;
mod memory;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;
use responder_types::{Answer, CreateAnswerRequest, CreateQuestionRequest, Question};
use std::path::PathBuf;
use tokio::sync::Mutex;

#[async_trait]
pub trait QuestionBackend: Send + Sync {
    async fn load(&self) -> Result<Vec<Question>, StoreError>;
    async fn save(&self, questions: &[Question]) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Question doesn't exists")]
    QuestionNotFound,

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed question file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn id_or_generate(id: Option<String>) -> String {
    id.filter(|id| !id.is_empty()).unwrap_or_else(generate_id)
}

/// Input for [`QuestionStore::add_answer`] and the nested answers of a
/// [`NewQuestion`].
#[derive(Debug, Clone, Default)]
pub struct NewAnswer {
    pub id: Option<String>,
    pub author: String,
    pub summary: String,
}

impl NewAnswer {
    pub fn new(author: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: None,
            author: author.into(),
            summary: summary.into(),
        }
    }

    fn into_answer(self) -> Answer {
        Answer {
            id: id_or_generate(self.id),
            author: self.author,
            summary: self.summary,
        }
    }
}

impl From<CreateAnswerRequest> for NewAnswer {
    fn from(request: CreateAnswerRequest) -> Self {
        Self::new(request.author, request.summary)
    }
}

/// Input for [`QuestionStore::add`]. Missing ids are generated and a missing
/// answer list becomes an empty one.
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    pub id: Option<String>,
    pub author: String,
    pub summary: String,
    pub answers: Option<Vec<NewAnswer>>,
}

impl NewQuestion {
    pub fn new(author: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: None,
            author: author.into(),
            summary: summary.into(),
            answers: None,
        }
    }

    pub fn with_answers(mut self, answers: Vec<NewAnswer>) -> Self {
        self.answers = Some(answers);
        self
    }

    fn into_question(self) -> Question {
        Question {
            id: id_or_generate(self.id),
            author: self.author,
            summary: self.summary,
            answers: self
                .answers
                .unwrap_or_default()
                .into_iter()
                .map(NewAnswer::into_answer)
                .collect(),
        }
    }
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(request: CreateQuestionRequest) -> Self {
        Self {
            id: None,
            author: request.author,
            summary: request.summary,
            answers: request
                .answers
                .map(|answers| answers.into_iter().map(NewAnswer::from).collect()),
        }
    }
}

pub struct QuestionStore {
    backend: Box<dyn QuestionBackend>,
    questions: Mutex<Vec<Question>>,
}

impl QuestionStore {
    pub async fn open<B>(backend: B) -> Result<Self, StoreError>
    where
        B: QuestionBackend + 'static,
    {
        let questions = backend.load().await?;
        Ok(Self {
            backend: Box::new(backend),
            questions: Mutex::new(questions),
        })
    }

    /// Opens a store over a JSON file, creating it with an empty list first
    /// when it does not exist yet.
    pub async fn open_file(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let backend = JsonFileBackend::new(path);
        backend.create_if_missing().await?;
        Self::open(backend).await
    }

    pub async fn list(&self) -> Vec<Question> {
        self.questions.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.questions.lock().await.len()
    }

    pub async fn get_by_id(&self, question_id: &str) -> Option<Question> {
        self.questions
            .lock()
            .await
            .iter()
            .find(|question| question.id == question_id)
            .cloned()
    }

    pub async fn add(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut questions = self.questions.lock().await;
        let stored = question.into_question();

        questions.push(stored.clone());
        if let Err(e) = self.backend.save(&questions).await {
            questions.pop();
            return Err(e);
        }

        Ok(stored)
    }

    pub async fn get_answers(&self, question_id: &str) -> Option<Vec<Answer>> {
        self.questions
            .lock()
            .await
            .iter()
            .find(|question| question.id == question_id)
            .map(|question| question.answers.clone())
    }

    /// Fails when the question is unknown; an unknown answer on a known
    /// question is `Ok(None)`.
    pub async fn get_answer(
        &self,
        question_id: &str,
        answer_id: &str,
    ) -> Result<Option<Answer>, StoreError> {
        let questions = self.questions.lock().await;
        let question = questions
            .iter()
            .find(|question| question.id == question_id)
            .ok_or(StoreError::QuestionNotFound)?;

        Ok(question.find_answer(answer_id).cloned())
    }

    /// Appends an answer under a freshly generated id. Any id carried by
    /// `answer` is ignored.
    pub async fn add_answer(
        &self,
        question_id: &str,
        answer: NewAnswer,
    ) -> Result<Answer, StoreError> {
        let mut questions = self.questions.lock().await;
        let index = questions
            .iter()
            .position(|question| question.id == question_id)
            .ok_or(StoreError::QuestionNotFound)?;

        let stored = NewAnswer { id: None, ..answer }.into_answer();

        questions[index].answers.push(stored.clone());
        if let Err(e) = self.backend.save(&questions).await {
            questions[index].answers.pop();
            return Err(e);
        }

        Ok(stored)
    }

    /// Replaces the in-memory collection with whatever the backend holds now.
    pub async fn reload(&self) -> Result<(), StoreError> {
        let mut questions = self.questions.lock().await;
        *questions = self.backend.load().await?;
        Ok(())
    }
}
