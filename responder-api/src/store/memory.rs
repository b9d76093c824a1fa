use super::{QuestionBackend, StoreError};
use async_trait::async_trait;
use responder_types::Question;
use std::sync::{Arc, Mutex, MutexGuard};

/// Backend that keeps the "persisted" collection in memory. Clones share
/// state, so a caller can keep one handle to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl MemoryBackend {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }

    pub fn snapshot(&self) -> Vec<Question> {
        self.lock().clone()
    }

    /// Overwrites the saved collection without going through a store.
    pub fn replace(&self, questions: Vec<Question>) {
        *self.lock() = questions;
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Question>> {
        self.questions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl QuestionBackend for MemoryBackend {
    async fn load(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, questions: &[Question]) -> Result<(), StoreError> {
        self.replace(questions.to_vec());
        Ok(())
    }
}
