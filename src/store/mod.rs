//! Leads store service.
//!
//! Wraps [`LeadsState`] behind a lock and drives it through [`reduce`]. Only
//! [`LeadsStore::load`] suspends; the filter mutators run to completion under the
//! write lock.

mod state;

pub use state::*;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::errors::AppError;
use crate::mapper::{map_record_to_lead, DemoAugmenter};
use crate::models::{Lead, LeadsSnapshot, SourceRecord};
use crate::source::RecordSource;

/// Process-wide leads store shared across handlers.
pub struct LeadsStore {
    state: RwLock<LeadsState>,
    source: Arc<dyn RecordSource>,
    augmenter: Mutex<DemoAugmenter>,
    fetch_limit: usize,
}

impl LeadsStore {
    pub fn new(source: Arc<dyn RecordSource>, augmenter: DemoAugmenter, fetch_limit: usize) -> Self {
        Self {
            state: RwLock::new(LeadsState::default()),
            source,
            augmenter: Mutex::new(augmenter),
            fetch_limit,
        }
    }

    async fn dispatch(&self, action: Action) -> LeadsState {
        let mut state = self.state.write().await;
        *state = reduce(std::mem::take(&mut *state), action);
        state.clone()
    }

    /// Fetch, map and store a fresh lead list.
    ///
    /// The lock is not held across the fetch. A completion that is no longer the
    /// latest started load is dropped by the reducer and reported as `Ok` with the
    /// current state, whatever its own outcome was. A failure of the latest load is
    /// both kept in the store and returned.
    pub async fn load(&self) -> Result<LeadsState, AppError> {
        let generation = self.dispatch(Action::LoadStarted).await.generation;
        tracing::info!("Loading leads (generation {})", generation);

        match self.source.fetch_records().await {
            Ok(records) => {
                let leads = self.build_leads(records).await;
                tracing::info!(
                    "Loaded {} leads (generation {})",
                    leads.len(),
                    generation
                );
                Ok(self
                    .dispatch(Action::LoadSucceeded { generation, leads })
                    .await)
            }
            Err(e) => {
                let state = self
                    .dispatch(Action::LoadFailed {
                        generation,
                        message: e.message(),
                    })
                    .await;
                if state.generation != generation {
                    tracing::info!(
                        "Ignoring failure of superseded load (generation {}, latest {}): {}",
                        generation,
                        state.generation,
                        e
                    );
                    return Ok(state);
                }
                tracing::warn!("Failed to load leads (generation {}): {}", generation, e);
                Err(e)
            }
        }
    }

    async fn build_leads(&self, records: Vec<SourceRecord>) -> Vec<Lead> {
        let mut augmenter = self.augmenter.lock().await;
        records
            .iter()
            .take(self.fetch_limit)
            .map(|record| augmenter.augment(map_record_to_lead(record)))
            .collect()
    }

    pub async fn set_search_query(&self, query: impl Into<String>) -> LeadsState {
        self.dispatch(Action::SetSearchQuery(query.into())).await
    }

    pub async fn toggle_tag(&self, tag: impl Into<String>) -> LeadsState {
        self.dispatch(Action::ToggleTag(tag.into())).await
    }

    pub async fn clear_filters(&self) -> LeadsState {
        self.dispatch(Action::ClearFilters).await
    }

    pub async fn state(&self) -> LeadsState {
        self.state.read().await.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    pub async fn snapshot(&self) -> LeadsSnapshot {
        snapshot_of(&*self.state.read().await)
    }
}

/// Build the presentation payload for `state`.
pub fn snapshot_of(state: &LeadsState) -> LeadsSnapshot {
    LeadsSnapshot {
        leads: state.leads.clone(),
        filtered_leads: state.filtered_leads.clone(),
        search_query: state.search_query.clone(),
        selected_tags: state.selected_tags.iter().cloned().collect(),
        available_tags: available_tags(&state.leads),
        has_active_filters: state.has_active_filters(),
        is_loading: state.is_loading,
        error: state.error.clone(),
        generation: state.generation,
        loaded_at: state.loaded_at.map(|t| t.to_rfc3339()),
    }
}
