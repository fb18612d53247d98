//! Data models for the Leads dashboard backend.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod lead;
mod snapshot;
mod source;

pub use lead::*;
pub use snapshot::*;
pub use source::*;
