use super::{QuestionBackend, StoreError};
use async_trait::async_trait;
use responder_types::Question;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::PathBuf;

const INDENT: &[u8] = b"    ";

/// Keeps the collection as one pretty-printed JSON array. Every save
/// rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes an empty collection when the file is absent. Returns whether
    /// the file was created.
    pub async fn create_if_missing(&self) -> Result<bool, StoreError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        self.save(&[]).await?;
        Ok(true)
    }

    /// Sibling the new contents are written to before being renamed over
    /// the real file.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "questions.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn render(questions: &[Question]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    questions.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl QuestionBackend for JsonFileBackend {
    async fn load(&self) -> Result<Vec<Question>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, questions: &[Question]) -> Result<(), StoreError> {
        let content = render(questions)?;
        let temp_path = self.temp_path();

        // Atomic write: the previous file stays intact until the rename
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|source| self.io_error(source))?;

        if let Err(source) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.io_error(source));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewAnswer, NewQuestion, QuestionStore};
    use responder_types::Answer;
    use tempfile::TempDir;

    fn sample() -> Vec<Question> {
        vec![Question {
            id: "q1".to_string(),
            author: "Jack London".to_string(),
            summary: "What is my name?".to_string(),
            answers: vec![Answer {
                id: "a1".to_string(),
                author: "test".to_string(),
                summary: "test".to_string(),
            }],
        }]
    }

    #[tokio::test]
    async fn save_writes_four_space_indented_array() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("questions.json"));

        backend.save(&sample()).await.unwrap();

        let content = std::fs::read_to_string(&backend.path).unwrap();
        assert!(content.starts_with("[\n    {\n        \"id\": \"q1\""));
        assert!(content.contains("\n        \"answers\": [\n            {\n"));
        assert_eq!(backend.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn create_if_missing_writes_empty_array_once() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested/questions.json"));

        assert!(backend.create_if_missing().await.unwrap());
        assert_eq!(std::fs::read_to_string(&backend.path).unwrap(), "[]");

        backend.save(&sample()).await.unwrap();
        assert!(!backend.create_if_missing().await.unwrap());
        assert_eq!(backend.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("questions.json"));

        backend.save(&sample()).await.unwrap();

        assert!(!backend.temp_path().exists());
        assert_eq!(backend.temp_path(), dir.path().join(".questions.json.tmp"));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_file_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.json");
        let store = QuestionStore::open_file(&path).await.unwrap();
        let kept = store.add(NewQuestion::new("Test", "test")).await.unwrap();

        // A directory in the way makes writing the new contents fail
        let backend = JsonFileBackend::new(&path);
        std::fs::create_dir(backend.temp_path()).unwrap();

        assert!(matches!(
            store.add(NewQuestion::new("Lost", "lost")).await,
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(
            store.add_answer(&kept.id, NewAnswer::new("Lost", "lost")).await,
            Err(StoreError::Io { .. })
        ));

        let on_disk = backend.load().await.unwrap();
        assert_eq!(on_disk, vec![kept]);
        assert_eq!(store.list().await, on_disk);

        store.reload().await.unwrap();
        assert_eq!(store.list().await, on_disk);
    }

    #[tokio::test]
    async fn concurrent_adds_all_reach_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.json");
        let store = std::sync::Arc::new(QuestionStore::open_file(&path).await.unwrap());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .add(NewQuestion::new(format!("author {i}"), "summary"))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let on_disk: Vec<Question> = serde_json::from_str(&content).unwrap();
        assert_eq!(on_disk.len(), 20);
        assert!(ids.iter().all(|id| on_disk.iter().any(|q| &q.id == id)));
    }

    #[tokio::test]
    async fn load_reports_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileBackend::new(&path).load().await.unwrap_err();

        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();

        let err = JsonFileBackend::new(dir.path().join("absent.json"))
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn answers_survive_reload_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.json");
        let store = QuestionStore::open_file(&path).await.unwrap();

        let question = store.add(NewQuestion::new("Test", "test")).await.unwrap();
        let answer = store
            .add_answer(&question.id, NewAnswer::new("test", "test?"))
            .await
            .unwrap();

        store.reload().await.unwrap();
        assert_eq!(
            store.get_answer(&question.id, &answer.id).await.unwrap(),
            Some(answer)
        );

        let reopened = QuestionStore::open_file(&path).await.unwrap();
        assert_eq!(reopened.list().await, store.list().await);
    }

    #[tokio::test]
    async fn reload_picks_up_external_edits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("questions.json");
        let store = QuestionStore::open_file(&path).await.unwrap();
        assert_eq!(store.count().await, 0);

        std::fs::write(&path, serde_json::to_string(&sample()).unwrap()).unwrap();
        store.reload().await.unwrap();

        assert_eq!(store.get_by_id("q1").await.unwrap().answers.len(), 1);
    }
}
