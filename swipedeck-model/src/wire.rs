//! Response shapes consumed from the platform API.
//!
//! These mirror the third-party JSON and tolerate missing fields the same
//! way the deck does: an absent list is an empty list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ProjectId;

/// Body of `GET /v9/projects`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectsEnvelope {
    #[cfg_attr(feature = "serde", serde(default))]
    pub projects: Vec<RawProject>,
}

/// A project record as returned by the platform, before resolution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawProject {
    pub id: ProjectId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub framework: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[cfg_attr(feature = "serde", serde(rename = "updatedAt", default))]
    pub updated_at: i64,
}

/// Body of `GET /v9/projects/{id}/domains`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainsEnvelope {
    #[cfg_attr(feature = "serde", serde(default))]
    pub domains: Vec<DomainRecord>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainRecord {
    pub name: String,
}
