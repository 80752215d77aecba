//! An in-memory online subsystem.
//!
//! [`MemorySubsystem`] is seeded up front and answers every request from that
//! seed. It is meant for tests and for driving the library without a host.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::OnlineError;
use crate::id::UniqueNetId;
use crate::identity::{IdentityInterface, UserPrivilege};
use crate::session::{
    SessionInterface, SessionSearch, SessionSearchResult, SessionSettings, SessionState,
    GAME_SESSION_NAME,
};
use crate::subsystem::OnlineSubsystem;

/// In-memory subsystem seeded with sessions, settings and privilege codes.
///
/// Searches return the seeded results that match the request's LAN flag and
/// query settings, truncated to the requested maximum. Every search request
/// is recorded and can be inspected with [`MemorySubsystem::requests`].
#[derive(Debug)]
pub struct MemorySubsystem {
    name: String,
    results: Vec<SessionSearchResult>,
    current: Option<(SessionState, SessionSettings)>,
    players: Vec<UniqueNetId>,
    privilege_codes: HashMap<UserPrivilege, u32>,
    sessions_enabled: bool,
    identity_enabled: bool,
    search_error: Option<OnlineError>,
    build_unique_id: i32,
    requests: RefCell<Vec<SessionSearch>>,
}

impl Default for MemorySubsystem {
    fn default() -> Self {
        MemorySubsystem::new("memory")
    }
}

impl MemorySubsystem {
    pub fn new(name: impl Into<String>) -> Self {
        MemorySubsystem {
            name: name.into(),
            results: Vec::new(),
            current: None,
            players: Vec::new(),
            privilege_codes: HashMap::new(),
            sessions_enabled: true,
            identity_enabled: true,
            search_error: None,
            build_unique_id: 0,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Seeds the results returned by searches.
    pub fn with_results(mut self, results: impl IntoIterator<Item = SessionSearchResult>) -> Self {
        self.results.extend(results);
        self
    }

    /// Registers the game session.
    pub fn with_current_session(mut self, state: SessionState, settings: SessionSettings) -> Self {
        self.current = Some((state, settings));
        self
    }

    pub fn with_player_in_session(mut self, player: impl Into<UniqueNetId>) -> Self {
        self.players.push(player.into());
        self
    }

    /// Sets the result code for a privilege. Unset privileges answer `0`.
    pub fn with_privilege_code(mut self, privilege: UserPrivilege, code: u32) -> Self {
        self.privilege_codes.insert(privilege, code);
        self
    }

    /// Drops the session interface.
    pub fn without_sessions(mut self) -> Self {
        self.sessions_enabled = false;
        self
    }

    /// Drops the identity interface.
    pub fn without_identity(mut self) -> Self {
        self.identity_enabled = false;
        self
    }

    /// Makes every search fail with `reason`.
    pub fn failing_search(mut self, reason: impl Into<String>) -> Self {
        self.search_error = Some(OnlineError::search_failed(reason));
        self
    }

    pub fn with_build_unique_id(mut self, id: i32) -> Self {
        self.build_unique_id = id;
        self
    }

    /// Returns the search requests received so far.
    pub fn requests(&self) -> Vec<SessionSearch> {
        self.requests.borrow().clone()
    }

    fn is_game_session(session_name: &str) -> bool {
        session_name == GAME_SESSION_NAME
    }
}

impl SessionInterface for MemorySubsystem {
    fn find_sessions(
        &self,
        searching_player: &UniqueNetId,
        search: &SessionSearch,
    ) -> Result<Vec<SessionSearchResult>, OnlineError> {
        self.requests.borrow_mut().push(search.clone());
        if let Some(err) = &self.search_error {
            return Err(err.clone());
        }

        let mut found: Vec<SessionSearchResult> = self
            .results
            .iter()
            .filter(|r| r.settings.is_lan == search.is_lan_query)
            .filter(|r| search.query_settings.matches(*r))
            .cloned()
            .collect();
        if search.max_search_results > 0 {
            found.truncate(search.max_search_results);
        }

        tracing::trace!(
            subsystem = %self.name,
            player = %searching_player,
            seeded = self.results.len(),
            returned = found.len(),
            "memory search answered"
        );
        Ok(found)
    }

    fn session_state(&self, session_name: &str) -> SessionState {
        match &self.current {
            Some((state, _)) if Self::is_game_session(session_name) => *state,
            _ => SessionState::NoSession,
        }
    }

    fn session_settings(&self, session_name: &str) -> Option<SessionSettings> {
        match &self.current {
            Some((_, settings)) if Self::is_game_session(session_name) => Some(settings.clone()),
            _ => None,
        }
    }

    fn is_player_in_session(&self, session_name: &str, player: &UniqueNetId) -> bool {
        self.current.is_some()
            && Self::is_game_session(session_name)
            && self.players.iter().any(|p| p.same_player(player))
    }
}

impl IdentityInterface for MemorySubsystem {
    fn get_user_privilege(
        &self,
        _player: &UniqueNetId,
        privilege: UserPrivilege,
    ) -> Result<u32, OnlineError> {
        Ok(self.privilege_codes.get(&privilege).copied().unwrap_or(0))
    }
}

impl OnlineSubsystem for MemorySubsystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn session_interface(&self) -> Option<&dyn SessionInterface> {
        if self.sessions_enabled {
            Some(self)
        } else {
            None
        }
    }

    fn identity_interface(&self) -> Option<&dyn IdentityInterface> {
        if self.identity_enabled {
            Some(self)
        } else {
            None
        }
    }

    fn build_unique_id(&self) -> i32 {
        self.build_unique_id
    }
}
