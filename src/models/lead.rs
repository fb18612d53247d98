//! Lead model matching the frontend Lead interface.

use serde::Serialize;

/// A labeled, colored category attached to a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTag {
    pub name: String,
    /// Display-only; never used for matching.
    pub color: String,
    pub count: u32,
}

/// The contact who introduced a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedContact {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// A prospective contact shown in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tags: Vec<LeadTag>,
    pub connected_with: ConnectedContact,
    /// Weekday and calendar date on two lines.
    pub date: String,
    pub has_export: bool,
    pub has_integration: bool,
    pub title: String,
    pub body: String,
}

impl Lead {
    /// Iterate over the names of the tags attached to this lead.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }
}
