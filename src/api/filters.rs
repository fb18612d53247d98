//! Search and tag filter endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{snapshot_response, ApiResult};
use crate::models::{LeadsSnapshot, SearchRequest};
use crate::AppState;

/// PUT /api/filters/search - Set the free-text search query.
pub async fn set_search_query(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<LeadsSnapshot> {
    snapshot_response(&state.store.set_search_query(request.query).await)
}

/// POST /api/filters/tags/:name/toggle - Select or deselect a tag.
///
/// Any name is accepted as-is; one that no lead carries simply matches nothing.
pub async fn toggle_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<LeadsSnapshot> {
    snapshot_response(&state.store.toggle_tag(name).await)
}

/// DELETE /api/filters - Clear the search query and tag selection.
pub async fn clear_filters(State(state): State<AppState>) -> ApiResult<LeadsSnapshot> {
    snapshot_response(&state.store.clear_filters().await)
}
