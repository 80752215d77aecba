//! Access to the settings carried by search candidates.
//!
//! The filter driver works over any item implementing
//! [`HasSessionProperties`]. [`SearchCandidate`] is the plain implementation:
//! an opaque id plus its property store.

use serde::{Deserialize, Serialize};

use crate::property::PropertyStore;

/// Types that expose a session property store to the filter driver.
///
/// # Example
///
/// ```
/// use sessionseek::{HasSessionProperties, PropertyEntry, PropertyStore, SearchFilter};
///
/// struct Lobby {
///     name: String,
///     settings: PropertyStore,
/// }
///
/// impl HasSessionProperties for Lobby {
///     fn session_properties(&self) -> &PropertyStore {
///         &self.settings
///     }
/// }
///
/// let lobbies = vec![
///     Lobby { name: "a".into(), settings: vec![PropertyEntry::string("Mode", "ctf")].into() },
///     Lobby { name: "b".into(), settings: vec![PropertyEntry::string("Mode", "dm")].into() },
/// ];
///
/// let found = SearchFilter::new().eq("Mode", "dm").build().filter(&lobbies);
/// assert_eq!(found[0].name, "b");
/// ```
pub trait HasSessionProperties {
    /// Returns the settings the filter constraints are evaluated against.
    fn session_properties(&self) -> &PropertyStore;
}

impl HasSessionProperties for PropertyStore {
    fn session_properties(&self) -> &PropertyStore {
        self
    }
}

impl<T: HasSessionProperties + ?Sized> HasSessionProperties for &T {
    fn session_properties(&self) -> &PropertyStore {
        (**self).session_properties()
    }
}

/// A search result reduced to what filtering needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Opaque identifier supplied by the session backend.
    pub id: String,
    /// Settings advertised by the session.
    #[serde(default)]
    pub properties: PropertyStore,
}

impl SearchCandidate {
    pub fn new(id: impl Into<String>, properties: impl Into<PropertyStore>) -> Self {
        SearchCandidate {
            id: id.into(),
            properties: properties.into(),
        }
    }
}

impl HasSessionProperties for SearchCandidate {
    fn session_properties(&self) -> &PropertyStore {
        &self.properties
    }
}
