use serde::{Deserialize, Serialize};

use crate::{
    corpus::{CorpusError, ResponseCorpus},
    model::{FocusPoint, QuestionId, Response},
};

/// A prompt together with its curated responses and focus points.
///
/// The engine only ever reads a question; new responses it synthesizes are
/// handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier
    pub id: QuestionId,
    /// Prompt shown to the student
    pub prompt: String,
    /// Known responses in corpus order
    pub responses: ResponseCorpus,
    /// Required substrings, checked in declared order
    #[serde(default)]
    pub focus_points: Vec<FocusPoint>,
}

impl Question {
    /// Build a question, validating the response corpus.
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        responses: Vec<Response>,
    ) -> Result<Self, CorpusError> {
        Ok(Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            responses: ResponseCorpus::new(responses)?,
            focus_points: Vec::new(),
        })
    }

    /// Attach focus points.
    pub fn with_focus_points(mut self, focus_points: Vec<FocusPoint>) -> Self {
        self.focus_points = focus_points;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_question() {
        let json = r#"{
            "id": "q1",
            "prompt": "Combine: The dog ran. It was quick.",
            "responses": [
                {"id": "o1", "text": "The dog ran quickly.", "optimal": true, "count": 4}
            ],
            "focus_points": [
                {"text": "quickly", "feedback": "Use an adverb.", "concept_id": "c1"}
            ]
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id.as_str(), "q1");
        assert_eq!(question.responses.len(), 1);
        assert_eq!(question.focus_points[0].concept_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_deserialize_rejects_bad_corpus() {
        let json = r#"{
            "id": "q1",
            "prompt": "p",
            "responses": [{"id": "e1", "text": "x", "parent_id": "nope"}]
        }"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
