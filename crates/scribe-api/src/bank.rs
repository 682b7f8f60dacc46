//! Read-only, in-memory question bank loaded once at startup.

use std::{collections::HashMap, path::Path, sync::Arc};

use scribe_match::{Question, QuestionId};

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: HashMap<QuestionId, Arc<Question>>,
}

impl QuestionBank {
    /// Index questions by id. Two questions sharing an id is an error.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, ApiError> {
        let mut map = HashMap::with_capacity(questions.len());
        for question in questions {
            let id = question.id.clone();
            if map.insert(id.clone(), Arc::new(question)).is_some() {
                return Err(ApiError::Validation(format!("duplicate question id: {id}")));
            }
        }
        Ok(Self { questions: map })
    }

    /// Load a JSON array of questions. Each response corpus is validated while
    /// it is deserialized.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        let bank = Self::from_questions(questions)?;

        tracing::info!(
            path = %path.display(),
            questions = bank.len(),
            "question bank loaded"
        );
        Ok(bank)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Question>> {
        self.questions.get(&QuestionId::new(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question ids in sorted order.
    pub fn ids(&self) -> Vec<&QuestionId> {
        let mut ids: Vec<_> = self.questions.keys().collect();
        ids.sort();
        ids
    }
}
