//! Session data exchanged with the host session interface.
//!
//! [`SessionInterface`] is the narrow request/response surface this crate
//! needs from the host's session service. Everything else here is the data
//! that crosses it.

use serde::{Deserialize, Serialize};
use sessionseek::{HasSessionProperties, PropertyEntry, PropertyStore, SearchFilter};

use crate::error::OnlineError;
use crate::id::UniqueNetId;
use crate::subsystem::OnlineSubsystem;

/// Name under which the host registers the game session.
pub const GAME_SESSION_NAME: &str = "Game";

/// Lifecycle state of a named session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    NoSession,
    Creating,
    Pending,
    Starting,
    InProgress,
    Ending,
    Ended,
    Destroying,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::NoSession => "no_session",
            SessionState::Creating => "creating",
            SessionState::Pending => "pending",
            SessionState::Starting => "starting",
            SessionState::InProgress => "in_progress",
            SessionState::Ending => "ending",
            SessionState::Ended => "ended",
            SessionState::Destroying => "destroying",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings a session was created with, plus its extra key/value settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub num_public_connections: i32,
    pub num_private_connections: i32,
    pub is_lan: bool,
    pub is_dedicated: bool,
    pub allow_invites: bool,
    pub allow_join_in_progress: bool,
    pub anti_cheat_protected: bool,
    pub build_unique_id: i32,
    /// Game-defined settings advertised with the session.
    pub extra: PropertyStore,
}

impl SessionSettings {
    /// Returns a copy with `updates` merged into the extra settings.
    pub fn with_extra<I>(&self, updates: I) -> SessionSettings
    where
        I: IntoIterator,
        I::Item: Into<PropertyEntry>,
    {
        SessionSettings {
            extra: self.extra.merge(updates),
            ..self.clone()
        }
    }
}

/// The request handed to the backend's search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSearch {
    /// Upper bound on returned results; `0` leaves it to the backend.
    pub max_search_results: usize,
    pub is_lan_query: bool,
    /// Constraints the backend applies on its side.
    pub query_settings: SearchFilter,
}

/// A single session returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSearchResult {
    pub session_id: String,
    pub owner_id: UniqueNetId,
    pub owner_name: String,
    pub ping_ms: i32,
    pub open_public_connections: i32,
    pub open_private_connections: i32,
    pub settings: SessionSettings,
}

impl SessionSearchResult {
    /// Returns `true` when the result refers to a joinable session.
    pub fn is_valid(&self) -> bool {
        !self.session_id.is_empty() && self.owner_id.is_valid()
    }

    pub fn build_unique_id(&self) -> i32 {
        self.settings.build_unique_id
    }

    /// Returns a copy of the session's extra settings.
    pub fn extra_settings(&self) -> PropertyStore {
        self.settings.extra.clone()
    }
}

impl HasSessionProperties for SessionSearchResult {
    fn session_properties(&self) -> &PropertyStore {
        &self.settings.extra
    }
}

/// Host session service.
pub trait SessionInterface {
    /// Runs a search on behalf of `searching_player`.
    fn find_sessions(
        &self,
        searching_player: &UniqueNetId,
        search: &SessionSearch,
    ) -> Result<Vec<SessionSearchResult>, OnlineError>;

    /// Returns the state of the named session.
    fn session_state(&self, session_name: &str) -> SessionState;

    /// Returns the settings of the named session, if it exists.
    fn session_settings(&self, session_name: &str) -> Option<SessionSettings>;

    /// Returns `true` if `player` is registered in the named session.
    fn is_player_in_session(&self, session_name: &str, player: &UniqueNetId) -> bool;
}

fn sessions(subsystem: &dyn OnlineSubsystem) -> Result<&dyn SessionInterface, OnlineError> {
    subsystem
        .session_interface()
        .ok_or(OnlineError::InterfaceUnavailable("session"))
}

/// Returns the state of the game session.
pub fn current_session_state(subsystem: &dyn OnlineSubsystem) -> Result<SessionState, OnlineError> {
    let sessions = sessions(subsystem).map_err(|e| {
        tracing::warn!("session state requested without a session interface");
        e
    })?;
    Ok(sessions.session_state(GAME_SESSION_NAME))
}

/// Returns the settings of the game session.
pub fn current_session_settings(
    subsystem: &dyn OnlineSubsystem,
) -> Result<SessionSettings, OnlineError> {
    let sessions = sessions(subsystem).map_err(|e| {
        tracing::warn!("session settings requested without a session interface");
        e
    })?;
    sessions
        .session_settings(GAME_SESSION_NAME)
        .ok_or_else(|| {
            tracing::warn!(session = GAME_SESSION_NAME, "no session settings available");
            OnlineError::SessionNotFound(GAME_SESSION_NAME.to_string())
        })
}

/// Returns `true` if `player` is in the game session.
///
/// Yields `false` when the subsystem has no session interface.
pub fn is_player_in_session(subsystem: &dyn OnlineSubsystem, player: &UniqueNetId) -> bool {
    match sessions(subsystem) {
        Ok(sessions) => sessions.is_player_in_session(GAME_SESSION_NAME, player),
        Err(_) => {
            tracing::warn!("player lookup requested without a session interface");
            false
        }
    }
}
