use scribe_match::{Question, Response};
use serde::{Deserialize, Serialize};

/// Body of every endpoint that takes a student submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionRequest {
    pub submission: String,
}

/// Overview of a question in the bank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionSummary {
    pub id: String,
    pub prompt: String,
    pub response_count: usize,
    pub optimal_count: usize,
    pub focus_point_count: usize,
}

impl From<&Question> for QuestionSummary {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.to_string(),
            prompt: question.prompt.clone(),
            response_count: question.responses.len(),
            optimal_count: question.responses.optimal().count(),
            focus_point_count: question.focus_points.len(),
        }
    }
}

/// Result of a nearest-response lookup; `null` when nothing was close enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LookupResponse {
    pub response: Option<Response>,
}
