use std::sync::Arc;

use crate::{ApiConfig, bank::QuestionBank, error::ApiError};

#[derive(Clone, Debug)]
pub struct ApiState {
    pub bank: Arc<QuestionBank>,
    pub max_submission_chars: u64,
}

impl ApiState {
    /// Load the question bank named by the configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let bank = QuestionBank::load(&config.questions_path)?;
        Ok(Self::with_bank(bank, config))
    }

    pub fn with_bank(bank: QuestionBank, config: &ApiConfig) -> Self {
        Self {
            bank: Arc::new(bank),
            max_submission_chars: config.max_submission_chars,
        }
    }
}
