//! Core data model definitions shared across SwipeDeck crates.
#![allow(missing_docs)]

pub mod color;
pub mod ids;
pub mod project;
pub mod wire;

pub use color::{AccentColor, Rgb};
pub use ids::ProjectId;
pub use project::{DEFAULT_FRAMEWORK_LABEL, Project};
pub use wire::{DomainRecord, DomainsEnvelope, ProjectsEnvelope, RawProject};
