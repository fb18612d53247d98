//! Lead data mapper.
//!
//! Turns upstream records into [`Lead`]s. Field derivation is deterministic; the
//! synthetic demo fields (tag, export/integration flags) come from a separate,
//! explicitly seeded [`DemoAugmenter`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ConnectedContact, Lead, LeadTag, SourceRecord};

/// Tag names the demo augmenter picks from.
pub const DEMO_TAG_NAMES: [&str; 5] = ["Team", "GITEX DUBAI", "Summit", "Enterprise", "Startup"];

/// Tag colors the demo augmenter picks from.
pub const DEMO_TAG_COLORS: [&str; 5] = ["#335cff", "#00ca72", "#fa7319", "#fb3748", "#7d52f4"];

/// Date shown for every mapped lead.
pub const LEAD_DATE: &str = "Tuesday\nAug 04 - 2025";

/// Avatar used for every connected contact.
pub const CONNECTED_AVATAR: &str = "/professional-headshot.png";

const LEAD_EMAIL_DOMAIN: &str = "company.com";
const CONNECTED_EMAIL_DOMAIN: &str = "alignui.com";

const TAG_PROBABILITY: f64 = 0.7;
const FLAG_PROBABILITY: f64 = 0.5;
const MAX_TAG_COUNT: u32 = 5;

/// First two space-separated words of `title`, each with its first letter upper-cased.
pub fn display_name(title: &str) -> String {
    title
        .split(' ')
        .take(2)
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lead_email(user_id: i64) -> String {
    format!("user{}@{}", user_id, LEAD_EMAIL_DOMAIN)
}

pub fn connected_email(user_id: i64) -> String {
    format!("user{}@{}", user_id, CONNECTED_EMAIL_DOMAIN)
}

/// Map an upstream record to a lead without any synthetic demo fields.
pub fn map_record_to_lead(record: &SourceRecord) -> Lead {
    let name = display_name(&record.title);

    Lead {
        id: record.id,
        name: name.clone(),
        email: lead_email(record.user_id),
        tags: Vec::new(),
        connected_with: ConnectedContact {
            name,
            email: connected_email(record.user_id),
            avatar: CONNECTED_AVATAR.to_string(),
        },
        date: LEAD_DATE.to_string(),
        has_export: false,
        has_integration: false,
        title: record.title.clone(),
        body: record.body.clone(),
    }
}

/// Decorates mapped leads with random demo data.
///
/// Two augmenters built from the same seed produce the same output for the same
/// sequence of leads.
#[derive(Debug, Clone)]
pub struct DemoAugmenter {
    rng: StdRng,
}

impl DemoAugmenter {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Build from an optional seed, falling back to OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Attach at most one random tag and roll both flags.
    pub fn augment(&mut self, mut lead: Lead) -> Lead {
        lead.tags = match self.random_tag() {
            Some(tag) => vec![tag],
            None => Vec::new(),
        };
        lead.has_export = self.rng.random_bool(FLAG_PROBABILITY);
        lead.has_integration = self.rng.random_bool(FLAG_PROBABILITY);
        lead
    }

    fn random_tag(&mut self) -> Option<LeadTag> {
        if !self.rng.random_bool(TAG_PROBABILITY) {
            return None;
        }

        let name = DEMO_TAG_NAMES[self.rng.random_range(0..DEMO_TAG_NAMES.len())];
        let color = DEMO_TAG_COLORS[self.rng.random_range(0..DEMO_TAG_COLORS.len())];
        let count = self.rng.random_range(1..=MAX_TAG_COUNT);

        Some(LeadTag {
            name: name.to_string(),
            color: color.to_string(),
            count,
        })
    }
}
