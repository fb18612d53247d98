//! Lead API endpoints.

use axum::extract::State;

use super::{error, snapshot_response, success, ApiResult};
use crate::models::LeadsSnapshot;
use crate::AppState;

/// GET /api/leads - Get the current store snapshot.
pub async fn get_leads(State(state): State<AppState>) -> ApiResult<LeadsSnapshot> {
    let snapshot = state.store.snapshot().await;
    let generation = snapshot.generation;
    success(snapshot, generation)
}

/// POST /api/leads/load - (Re)load leads from the record source.
///
/// Answers 502 only when this request is still the latest load and it failed.
pub async fn load_leads(State(state): State<AppState>) -> ApiResult<LeadsSnapshot> {
    match state.store.load().await {
        Ok(current) => snapshot_response(&current),
        Err(e) => error(e, state.store.generation().await),
    }
}
