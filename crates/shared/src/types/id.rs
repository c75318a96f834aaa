//! Record identifiers and the acting identity.
//!
//! Records are keyed by text ids. Freshly generated ids are UUID v7, so they
//! sort by creation time, but ids written by seeds or imports may be any
//! non-empty string.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a new record identifier.
#[must_use]
pub fn new_record_id() -> String {
    Uuid::now_v7().to_string()
}

/// The identity on whose behalf a change is made, recorded in audit logs and
/// on journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
    const SYSTEM: &'static str = "system";

    /// Creates an actor from a name; blank names fall back to [`Actor::system`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::system()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The actor used for unattended jobs such as seeding.
    #[must_use]
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    /// Returns the actor name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
