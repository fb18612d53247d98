//! REST API module.
//!
//! Exposes the leads store to the dashboard: one read endpoint for the full
//! snapshot and one endpoint per store mutator. Every response, success or
//! error, carries the store `generation`: the number of the most recently
//! started load. The dashboard can compare it across responses to tell whether
//! a reload happened in between.

mod filters;
mod leads;
mod tags;

pub use filters::*;
pub use leads::*;
pub use tags::*;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppErrorWithGeneration};
use crate::models::LeadsSnapshot;
use crate::store::{snapshot_of, LeadsState};
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    /// Generation of the latest started load when the response was built.
    pub generation: u64,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithGeneration>;

pub fn success<T: Serialize>(data: T, generation: u64) -> ApiResult<T> {
    Ok(ApiResponse {
        success: true,
        data,
        generation,
    })
}

pub fn error<T: Serialize>(error: AppError, generation: u64) -> ApiResult<T> {
    Err(AppErrorWithGeneration { error, generation })
}

/// Respond with the snapshot of a state a mutator just produced.
fn snapshot_response(state: &LeadsState) -> ApiResult<LeadsSnapshot> {
    success(snapshot_of(state), state.generation)
}

/// Fallback for unknown API routes.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> ApiResult<()> {
    error(
        AppError::NotFound(format!("No route for {}", uri.path())),
        state.store.generation().await,
    )
}
