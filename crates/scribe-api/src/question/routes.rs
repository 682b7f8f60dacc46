use std::sync::Arc;

use axum::{
    Json, Router,
    Extension,
    extract::{Path, State},
    routing::{get, post},
};
use scribe_match::{MatchResult, Question};
use validator::ValidateLength;

use super::model::{LookupResponse, QuestionSummary, SubmissionRequest};
use crate::{ApiState, error::ApiError, metrics, middleware::request_id::RequestId};

/// Create the question routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/questions/{question_id}", get(get_question))
        .route("/questions/{question_id}/classify", post(classify_submission))
        .route("/questions/{question_id}/fuzzy", post(fuzzy_lookup))
        .route("/questions/{question_id}/typo", post(typo_lookup))
}

fn find_question(state: &ApiState, question_id: &str) -> Result<Arc<Question>, ApiError> {
    state
        .bank
        .get(question_id)
        .ok_or_else(|| ApiError::NotFound(format!("Question {question_id}")))
}

/// Reject submissions longer than `max_chars` characters
fn validate_submission(submission: &str, max_chars: u64) -> Result<(), ApiError> {
    if !submission.validate_length(None, Some(max_chars), None) {
        return Err(ApiError::Validation(format!(
            "Submission must be at most {max_chars} characters long"
        )));
    }
    Ok(())
}

/// List every question in the bank
async fn list_questions(State(state): State<ApiState>) -> Json<Vec<QuestionSummary>> {
    let summaries = state
        .bank
        .ids()
        .into_iter()
        .filter_map(|id| state.bank.get(id.as_str()))
        .map(|question| QuestionSummary::from(question.as_ref()))
        .collect();
    Json(summaries)
}

/// Get a question summary by ID
async fn get_question(
    State(state): State<ApiState>,
    Path(question_id): Path<String>,
) -> Result<Json<QuestionSummary>, ApiError> {
    let question = find_question(&state, &question_id)?;
    Ok(Json(QuestionSummary::from(question.as_ref())))
}

/// Run a submission through the classification cascade
async fn classify_submission(
    State(state): State<ApiState>,
    Path(question_id): Path<String>,
    request_id: Option<Extension<RequestId>>,
    Json(payload): Json<SubmissionRequest>,
) -> Result<Json<MatchResult>, ApiError> {
    let question = find_question(&state, &question_id)?;
    validate_submission(&payload.submission, state.max_submission_chars)?;

    let result = scribe_match::classify(&question, &payload.submission);
    metrics::record_classification(&result);

    tracing::info!(
        request_id = request_id.as_ref().map_or("-", |Extension(id)| id.as_str()),
        question_id = %question.id,
        outcome = result.outcome.label(),
        found = result.found,
        new_response = result.is_new_response(),
        "submission classified"
    );

    Ok(Json(result))
}

/// Nearest known response by n-gram similarity
async fn fuzzy_lookup(
    State(state): State<ApiState>,
    Path(question_id): Path<String>,
    Json(payload): Json<SubmissionRequest>,
) -> Result<Json<LookupResponse>, ApiError> {
    let question = find_question(&state, &question_id)?;
    validate_submission(&payload.submission, state.max_submission_chars)?;

    let response =
        scribe_match::fuzzy_find(&payload.submission, question.responses.as_slice()).cloned();
    Ok(Json(LookupResponse { response }))
}

/// Feedback-bearing response the submission is a small typo away from
async fn typo_lookup(
    State(state): State<ApiState>,
    Path(question_id): Path<String>,
    Json(payload): Json<SubmissionRequest>,
) -> Result<Json<LookupResponse>, ApiError> {
    let question = find_question(&state, &question_id)?;
    validate_submission(&payload.submission, state.max_submission_chars)?;

    let response =
        scribe_match::small_typo_match(&payload.submission, &question.responses).cloned();
    Ok(Json(LookupResponse { response }))
}
