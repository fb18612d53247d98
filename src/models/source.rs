//! Upstream record model as served by the placeholder posts API.

use serde::Deserialize;

/// A raw record from the external collection endpoint.
///
/// Only the four fields below are read; anything else the upstream sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}
