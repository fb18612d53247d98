//! Store snapshot model returned to the presentation layer.

use serde::{Deserialize, Serialize};

use super::Lead;

/// Everything the dashboard reads from the leads store, in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadsSnapshot {
    pub leads: Vec<Lead>,
    pub filtered_leads: Vec<Lead>,
    pub search_query: String,
    pub selected_tags: Vec<String>,
    pub available_tags: Vec<String>,
    pub has_active_filters: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
}

/// Request body for updating the free-text search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}
