//! Leads state and its transition function.
//!
//! `filtered_leads` is always `filter_leads(leads, search_query, selected_tags)`;
//! every transition below re-derives it instead of patching it.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};

use crate::models::Lead;

/// Owned state of the leads dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadsState {
    pub leads: Vec<Lead>,
    pub filtered_leads: Vec<Lead>,
    pub search_query: String,
    pub selected_tags: BTreeSet<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Generation of the most recently started load.
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// A state transition.
#[derive(Debug, Clone)]
pub enum Action {
    LoadStarted,
    LoadSucceeded { generation: u64, leads: Vec<Lead> },
    LoadFailed { generation: u64, message: String },
    SetSearchQuery(String),
    ToggleTag(String),
    ClearFilters,
}

impl LeadsState {
    /// Whether a search query or a tag selection is narrowing the view.
    pub fn has_active_filters(&self) -> bool {
        !self.search_query.is_empty() || !self.selected_tags.is_empty()
    }

    fn refilter(&mut self) {
        self.filtered_leads = filter_leads(&self.leads, &self.search_query, &self.selected_tags);
    }
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(mut state: LeadsState, action: Action) -> LeadsState {
    match action {
        Action::LoadStarted => {
            state.generation += 1;
            state.is_loading = true;
            state.error = None;
        }
        Action::LoadSucceeded { generation, leads } => {
            if generation != state.generation {
                tracing::debug!(
                    "Discarding stale load result (generation {}, latest {})",
                    generation,
                    state.generation
                );
                return state;
            }
            state.leads = leads;
            state.refilter();
            state.is_loading = false;
            state.error = None;
            state.loaded_at = Some(Utc::now());
        }
        Action::LoadFailed {
            generation,
            message,
        } => {
            if generation != state.generation {
                tracing::debug!(
                    "Discarding stale load failure (generation {}, latest {})",
                    generation,
                    state.generation
                );
                return state;
            }
            state.is_loading = false;
            state.error = Some(message);
        }
        Action::SetSearchQuery(query) => {
            state.search_query = query;
            state.refilter();
        }
        Action::ToggleTag(tag) => {
            if !state.selected_tags.remove(&tag) {
                state.selected_tags.insert(tag);
            }
            state.refilter();
        }
        Action::ClearFilters => {
            state.search_query.clear();
            state.selected_tags.clear();
            state.filtered_leads = state.leads.clone();
        }
    }
    state
}

/// Case-insensitive substring match against name, email or any tag name.
pub fn text_matches(lead: &Lead, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    lead.name.to_lowercase().contains(&needle)
        || lead.email.to_lowercase().contains(&needle)
        || lead
            .tag_names()
            .any(|name| name.to_lowercase().contains(&needle))
}

/// True when nothing is selected or the lead carries at least one selected tag.
pub fn tag_matches(lead: &Lead, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || lead.tag_names().any(|name| selected.contains(name))
}

/// Leads matching both predicates, in their original order.
pub fn filter_leads(leads: &[Lead], query: &str, selected: &BTreeSet<String>) -> Vec<Lead> {
    leads
        .iter()
        .filter(|lead| text_matches(lead, query) && tag_matches(lead, selected))
        .cloned()
        .collect()
}

/// Unique tag names across `leads`, in order of first appearance.
pub fn available_tags(leads: &[Lead]) -> Vec<String> {
    let mut seen = HashSet::new();
    leads
        .iter()
        .flat_map(|lead| lead.tag_names())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectedContact, LeadTag};

    fn lead(id: i64, name: &str, email: &str, tags: &[&str]) -> Lead {
        Lead {
            id,
            name: name.to_string(),
            email: email.to_string(),
            tags: tags
                .iter()
                .map(|t| LeadTag {
                    name: t.to_string(),
                    color: "#335cff".to_string(),
                    count: 1,
                })
                .collect(),
            connected_with: ConnectedContact {
                name: name.to_string(),
                email: email.to_string(),
                avatar: "/professional-headshot.png".to_string(),
            },
            date: "Tuesday\nAug 04 - 2025".to_string(),
            has_export: false,
            has_integration: false,
            title: name.to_lowercase(),
            body: String::new(),
        }
    }

    fn alice_and_bob() -> Vec<Lead> {
        vec![
            lead(1, "Alice Smith", "a@x.com", &["Team"]),
            lead(2, "Bob Jones", "b@x.com", &[]),
        ]
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead(1, "Alice Smith", "alice@company.com", &["Team"]),
            lead(2, "Bob Jones", "bob@company.com", &[]),
            lead(3, "Carol Summit", "carol@alignui.com", &["Enterprise"]),
            lead(4, "Dan Brown", "dan@company.com", &["Summit"]),
            lead(5, "Eve Adams", "eve@startup.io", &["Startup", "Team"]),
            lead(6, "Frank Team", "frank@company.com", &["GITEX DUBAI"]),
        ]
    }

    fn loaded(leads: Vec<Lead>) -> LeadsState {
        let state = reduce(LeadsState::default(), Action::LoadStarted);
        let generation = state.generation;
        reduce(state, Action::LoadSucceeded { generation, leads })
    }

    fn ids(leads: &[Lead]) -> Vec<i64> {
        leads.iter().map(|l| l.id).collect()
    }

    fn tags(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn assert_consistent(state: &LeadsState) {
        assert_eq!(
            state.filtered_leads,
            filter_leads(&state.leads, &state.search_query, &state.selected_tags)
        );
    }

    #[test]
    fn test_alice_bob_scenario() {
        let state = loaded(alice_and_bob());

        let state = reduce(state, Action::SetSearchQuery("alice".to_string()));
        assert_eq!(ids(&state.filtered_leads), vec![1]);

        let state = reduce(state, Action::ClearFilters);
        assert_eq!(ids(&state.filtered_leads), vec![1, 2]);

        let state = reduce(state, Action::ToggleTag("Team".to_string()));
        assert_eq!(ids(&state.filtered_leads), vec![1]);

        let state = reduce(state, Action::ToggleTag("Team".to_string()));
        assert_eq!(ids(&state.filtered_leads), vec![1, 2]);
    }

    #[test]
    fn test_empty_filters_are_identity() {
        let leads = sample();
        assert_eq!(filter_leads(&leads, "", &BTreeSet::new()), leads);
    }

    #[test]
    fn test_filter_matches_predicate_definition() {
        let leads = sample();
        let cases: Vec<(&str, BTreeSet<String>, Vec<i64>)> = vec![
            // "summit" hits a name (Carol Summit) and a tag (Dan).
            ("summit", tags(&[]), vec![3, 4]),
            ("SUMMIT", tags(&["Summit"]), vec![4]),
            // Tag-only match on "Team" also finds Frank by name.
            ("team", tags(&[]), vec![1, 5, 6]),
            ("", tags(&["Team", "Enterprise"]), vec![1, 3, 5]),
            ("company.com", tags(&["Team"]), vec![1]),
            ("alignui", tags(&["Team"]), vec![]),
            ("nobody", tags(&[]), vec![]),
            ("", tags(&["Unknown"]), vec![]),
        ];

        for (query, selected, expected) in cases {
            let filtered = filter_leads(&leads, query, &selected);
            assert_eq!(ids(&filtered), expected, "query={:?} tags={:?}", query, selected);

            let by_definition: Vec<i64> = leads
                .iter()
                .filter(|l| text_matches(l, query) && tag_matches(l, &selected))
                .map(|l| l.id)
                .collect();
            assert_eq!(ids(&filtered), by_definition);
        }
    }

    #[test]
    fn test_query_is_stored_verbatim() {
        let state = loaded(sample());
        let state = reduce(state, Action::SetSearchQuery(" Bob ".to_string()));

        assert_eq!(state.search_query, " Bob ");
        // Surrounding spaces are part of the needle.
        assert!(state.filtered_leads.is_empty());
    }

    #[test]
    fn test_order_of_mutations_does_not_matter() {
        let base = loaded(sample());

        let a = reduce(base.clone(), Action::SetSearchQuery("com".to_string()));
        let a = reduce(a, Action::ToggleTag("Team".to_string()));
        let a = reduce(a, Action::ToggleTag("Summit".to_string()));

        let b = reduce(base.clone(), Action::ToggleTag("Summit".to_string()));
        let b = reduce(b, Action::ToggleTag("Enterprise".to_string()));
        let b = reduce(b, Action::SetSearchQuery("xyz".to_string()));
        let b = reduce(b, Action::ToggleTag("Team".to_string()));
        let b = reduce(b, Action::ToggleTag("Enterprise".to_string()));
        let b = reduce(b, Action::SetSearchQuery("com".to_string()));

        assert_eq!(a.search_query, b.search_query);
        assert_eq!(a.selected_tags, b.selected_tags);
        assert_eq!(a.filtered_leads, b.filtered_leads);
        assert_eq!(ids(&a.filtered_leads), vec![1, 4]);
        assert_consistent(&a);
        assert_consistent(&b);
    }

    #[test]
    fn test_toggle_tag_is_its_own_inverse() {
        let state = loaded(sample());
        let state = reduce(state, Action::ToggleTag("Enterprise".to_string()));
        let state = reduce(state, Action::SetSearchQuery("a".to_string()));

        for tag in ["Team", "Enterprise", "Nope"] {
            let toggled = reduce(state.clone(), Action::ToggleTag(tag.to_string()));
            let restored = reduce(toggled, Action::ToggleTag(tag.to_string()));
            assert_eq!(restored.selected_tags, state.selected_tags);
            assert_eq!(restored.filtered_leads, state.filtered_leads);
        }
    }

    #[test]
    fn test_clear_filters_is_idempotent() {
        let state = loaded(sample());
        let state = reduce(state, Action::SetSearchQuery("dan".to_string()));
        let state = reduce(state, Action::ToggleTag("Summit".to_string()));

        let once = reduce(state, Action::ClearFilters);
        let twice = reduce(once.clone(), Action::ClearFilters);

        assert_eq!(once, twice);
        assert_eq!(once.filtered_leads, once.leads);
        assert!(!once.has_active_filters());
    }

    #[test]
    fn test_load_resets_visible_set_without_filters() {
        let state = loaded(sample());
        assert_eq!(state.filtered_leads, state.leads);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.loaded_at.is_some());
    }

    #[test]
    fn test_reload_keeps_active_filters() {
        let state = loaded(alice_and_bob());
        let state = reduce(state, Action::ToggleTag("Team".to_string()));

        let state = reduce(state, Action::LoadStarted);
        let generation = state.generation;
        let state = reduce(
            state,
            Action::LoadSucceeded {
                generation,
                leads: sample(),
            },
        );

        assert!(state.selected_tags.contains("Team"));
        assert_eq!(ids(&state.filtered_leads), vec![1, 5]);
        assert_consistent(&state);
    }

    #[test]
    fn test_failed_load_keeps_leads() {
        let state = loaded(sample());
        let before = state.leads.clone();

        let state = reduce(state, Action::LoadStarted);
        assert!(state.is_loading);
        let generation = state.generation;
        let state = reduce(
            state,
            Action::LoadFailed {
                generation,
                message: "Failed to fetch leads (HTTP 500)".to_string(),
            },
        );

        assert!(!state.is_loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to fetch leads (HTTP 500)")
        );
        assert_eq!(state.leads, before);
        assert_eq!(state.filtered_leads, before);
    }

    #[test]
    fn test_load_started_clears_error() {
        let state = reduce(LeadsState::default(), Action::LoadStarted);
        let state = reduce(
            state,
            Action::LoadFailed {
                generation: 1,
                message: "boom".to_string(),
            },
        );
        let state = reduce(state, Action::LoadStarted);

        assert!(state.error.is_none());
        assert!(state.is_loading);
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_stale_load_result_is_discarded() {
        let state = reduce(LeadsState::default(), Action::LoadStarted);
        let first = state.generation;
        let state = reduce(state, Action::LoadStarted);
        let second = state.generation;

        // The newer request finishes first.
        let state = reduce(
            state,
            Action::LoadSucceeded {
                generation: second,
                leads: alice_and_bob(),
            },
        );
        let state = reduce(
            state,
            Action::LoadSucceeded {
                generation: first,
                leads: sample(),
            },
        );
        assert_eq!(ids(&state.leads), vec![1, 2]);

        let state = reduce(
            state,
            Action::LoadFailed {
                generation: first,
                message: "late failure".to_string(),
            },
        );
        assert!(state.error.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_available_tags_first_appearance_order() {
        assert_eq!(
            available_tags(&sample()),
            vec!["Team", "Enterprise", "Summit", "Startup", "GITEX DUBAI"]
        );
        assert!(available_tags(&[]).is_empty());
    }
}
