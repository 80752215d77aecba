//! Sessionseek - typed session settings and search-result filtering.
//!
//! Online session backends advertise each session with a list of extra
//! settings: named values of a handful of primitive kinds. Sessionseek
//! models those settings and provides the small amount of logic a session
//! browser needs on top of the backend:
//!
//! - [`TypedValue`]: the tagged value stored against each setting name
//! - [`PropertyStore`]: ordered, unique-keyed settings with merge-or-append
//!   updates and typed lookups
//! - [`compare`]: the comparator engine for two typed values
//! - [`SearchFilter`]: AND-combined constraints applied to search candidates
//!
//! # Quick Start
//!
//! ```rust
//! use sessionseek::{PropertyEntry, SearchCandidate, SearchFilter, Lookup};
//!
//! let candidates = vec![
//!     SearchCandidate::new("eu-1", vec![
//!         PropertyEntry::string("Region", "EU"),
//!         PropertyEntry::int("Slots", 6),
//!     ]),
//!     SearchCandidate::new("na-1", vec![
//!         PropertyEntry::string("Region", "NA"),
//!         PropertyEntry::int("Slots", 4),
//!     ]),
//! ];
//!
//! let filter = SearchFilter::new()
//!     .eq("Region", "NA")
//!     .lt("Ping", 50)          // no candidate advertises Ping: skipped
//!     .build();
//!
//! let results = filter.filter(&candidates);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].properties.get_int("Slots"), Lookup::Found(4));
//! ```
//!
//! # Comparison Semantics
//!
//! | Kind | Comparators |
//! |------|-------------|
//! | Bool, String | `Equals`, `NotEquals` |
//! | Int32, Int64, Float, Double | all six |
//! | Blob, Empty | none (always `false`) |
//!
//! Values of different kinds never compare true, whatever the comparator.
//!
//! # Filter Semantics
//!
//! A constraint whose key the candidate does not carry is skipped. A
//! constraint whose key is present must succeed or the candidate is dropped.
//! Survivors keep their order.

mod clause;
mod error;
mod lookup;
mod op;
mod property;
mod query;
mod traits;
mod value;

// Re-export public API
pub use clause::{compare, ConstraintOutcome, FilterConstraint};
pub use error::{Result, SessionSeekError};
pub use lookup::{Lookup, LookupStatus};
pub use op::Comparator;
pub use property::{PropertyEntry, PropertyStore};
pub use query::{filter_candidates, SearchFilter};
pub use traits::{HasSessionProperties, SearchCandidate};
pub use value::{TypedValue, ValueKind};
