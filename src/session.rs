//! Session-scoped store for the most recent generation batch

use crate::model::ResultBatch;

/// Single-slot, last-write-wins store for one interactive session.
///
/// The slot is absent until the first successful generation and is replaced,
/// never merged, on each subsequent one. The store is owned and passed
/// explicitly by the caller so that a server deployment can run one per
/// session without ambient global state.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<ResultBatch>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current batch with a new one.
    pub fn put(&mut self, batch: ResultBatch) {
        self.current = Some(batch);
    }

    /// The most recently stored batch, if any generation has succeeded yet.
    pub fn get(&self) -> Option<&ResultBatch> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Question};

    fn batch_with_question(text: &str) -> ResultBatch {
        ResultBatch {
            questions: vec![Question {
                category: "Technical Skills".to_string(),
                difficulty: Difficulty::Easy,
                question: text.to_string(),
                instructions: None,
                test_cases: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_until_first_put() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert!(store.get().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = SessionStore::new();
        store.put(batch_with_question("first"));
        store.put(batch_with_question("second"));

        let current = store.get().unwrap();
        assert_eq!(current.questions.len(), 1);
        assert_eq!(current.questions[0].question, "second");
    }

    #[test]
    fn test_clear() {
        let mut store = SessionStore::new();
        store.put(batch_with_question("only"));
        store.clear();
        assert!(store.is_empty());
    }
}
