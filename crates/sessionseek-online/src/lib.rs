//! Online-subsystem boundary for sessionseek.
//!
//! The host's online services are reached through an injected
//! [`OnlineSubsystem`] handle exposing a [`SessionInterface`] and an
//! [`IdentityInterface`]. On top of that this crate provides:
//!
//! - [`SearchRequest`] and [`find_sessions`]: building and running session
//!   searches, then narrowing results with the request's filters
//! - [`check_privilege`]: privilege checks mapped to a [`PrivilegeOutcome`]
//! - session helpers for the game session's state and settings
//! - [`has_online_subsystem`] and [`current_build_unique_id`] for backend
//!   identification
//! - [`MemorySubsystem`]: a seeded in-memory backend
//!
//! ```rust
//! use sessionseek::{Comparator, FilterConstraint, PropertyEntry};
//! use sessionseek_online::{
//!     find_sessions, MemorySubsystem, SearchRequest, SessionSearchResult, SessionSettings,
//!     UniqueNetId,
//! };
//!
//! let lobby = |id: &str, mode: &str| SessionSearchResult {
//!     session_id: id.into(),
//!     settings: SessionSettings {
//!         extra: vec![PropertyEntry::string("Mode", mode)].into(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let online = MemorySubsystem::default().with_results([lobby("a", "ctf"), lobby("b", "dm")]);
//!
//! let request = SearchRequest::new(10)
//!     .filter(FilterConstraint::new("Mode", Comparator::Equals, "dm"));
//! let found = find_sessions(&online, &UniqueNetId::from("player-1"), &request);
//!
//! let kept = request.filter_results(found.into_results());
//! assert_eq!(kept[0].session_id, "b");
//! ```

mod error;
mod id;
mod identity;
mod memory;
mod search;
mod session;
mod subsystem;

pub use error::OnlineError;
pub use id::{UniqueNetId, BAD_UNIQUE_NET_ID};
pub use identity::{check_privilege, IdentityInterface, PrivilegeOutcome, UserPrivilege};
pub use memory::MemorySubsystem;
pub use search::{
    find_sessions, SearchOutcome, SearchRequest, ServerPresence, SEARCH_DEDICATED_ONLY,
    SEARCH_EMPTY_SERVERS_ONLY, SEARCH_MINSLOTSAVAILABLE, SEARCH_NONEMPTY_SERVERS_ONLY,
    SEARCH_PRESENCE, SEARCH_SECURE_SERVERS_ONLY,
};
pub use session::{
    current_session_settings, current_session_state, is_player_in_session, SessionInterface,
    SessionSearch, SessionSearchResult, SessionSettings, SessionState, GAME_SESSION_NAME,
};
pub use subsystem::{current_build_unique_id, has_online_subsystem, OnlineSubsystem};
