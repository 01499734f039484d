use url::Url;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AccentColor, ProjectId};

/// Label shown when the platform does not report a framework.
pub const DEFAULT_FRAMEWORK_LABEL: &str = "Vercel";

/// A fully resolved project, ready to be shown as a card.
///
/// Immutable once constructed; the deck only ever hands out shared
/// references.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Project {
    id: ProjectId,
    name: String,
    url: Url,
    framework: Option<String>,
    accent_color: AccentColor,
    description: String,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        url: Url,
        framework: Option<String>,
        accent_color: AccentColor,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url,
            framework,
            accent_color,
            description: description.into(),
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Public URL, always absolute with scheme.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn framework(&self) -> Option<&str> {
        self.framework.as_deref()
    }

    /// Framework for display, falling back to the platform name.
    pub fn framework_label(&self) -> &str {
        self.framework().unwrap_or(DEFAULT_FRAMEWORK_LABEL)
    }

    pub fn accent_color(&self) -> AccentColor {
        self.accent_color
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
