//! Player identity handles.

use serde::{Deserialize, Serialize};

/// Text rendered for an id that does not refer to a player.
pub const BAD_UNIQUE_NET_ID: &str = "ERROR, BAD UNIQUE NET ID";

/// Opaque player id issued by the online subsystem.
///
/// An id may be empty (for example when a player has not logged in yet).
/// Derived equality is structural; use [`UniqueNetId::same_player`] when two
/// empty ids must not be considered the same player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueNetId(Option<String>);

impl UniqueNetId {
    /// Creates an id from its backend representation.
    ///
    /// Empty strings produce an invalid id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() {
            UniqueNetId(None)
        } else {
            UniqueNetId(Some(id))
        }
    }

    /// Creates an id that refers to no player.
    pub fn invalid() -> Self {
        UniqueNetId(None)
    }

    pub fn is_valid(&self) -> bool {
        matches!(&self.0, Some(id) if !id.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns `true` only when both ids are valid and equal.
    pub fn same_player(&self, other: &UniqueNetId) -> bool {
        match (self.as_str(), other.as_str()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Renders the id for showing to a user.
    ///
    /// Same text as `Display`, but an invalid id is logged as a warning.
    pub fn display_name(&self) -> String {
        if !self.is_valid() {
            tracing::warn!("rendering an invalid unique net id");
        }
        self.to_string()
    }
}

impl std::fmt::Display for UniqueNetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_str() {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "{}", BAD_UNIQUE_NET_ID),
        }
    }
}

impl From<&str> for UniqueNetId {
    fn from(id: &str) -> Self {
        UniqueNetId::new(id)
    }
}

impl From<String> for UniqueNetId {
    fn from(id: String) -> Self {
        UniqueNetId::new(id)
    }
}
