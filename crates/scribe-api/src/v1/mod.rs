use axum::Router;

use crate::{question, state::ApiState};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new().merge(question::routes())
}
