//! Tag API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::store::available_tags;
use crate::AppState;

/// GET /api/tags - List the tag names present in the loaded leads.
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let current = state.store.state().await;
    success(available_tags(&current.leads), current.generation)
}
