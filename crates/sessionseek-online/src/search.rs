//! Session search requests and the search driver.
//!
//! A [`SearchRequest`] is what a caller fills in. It is translated into the
//! backend's [`SessionSearch`] by [`SearchRequest::to_session_search`], run
//! through [`find_sessions`], and the returned results can then be narrowed
//! locally with [`SearchRequest::filter_results`].

use serde::{Deserialize, Serialize};
use sessionseek::{Comparator, FilterConstraint, SearchFilter, TypedValue};

use crate::error::OnlineError;
use crate::id::UniqueNetId;
use crate::session::{SessionSearch, SessionSearchResult};
use crate::subsystem::OnlineSubsystem;

/// Only return sessions with no players.
pub const SEARCH_EMPTY_SERVERS_ONLY: &str = "EMPTYONLY";
/// Only return sessions with at least one player.
pub const SEARCH_NONEMPTY_SERVERS_ONLY: &str = "NONEMPTYONLY";
/// Only return anti-cheat protected sessions.
pub const SEARCH_SECURE_SERVERS_ONLY: &str = "SECUREONLY";
/// Minimum number of open slots.
pub const SEARCH_MINSLOTSAVAILABLE: &str = "MINSLOTSAVAILABLE";
/// Only return sessions hosted by clients.
pub const SEARCH_PRESENCE: &str = "PRESENCESEARCH";
/// Only return dedicated servers.
pub const SEARCH_DEDICATED_ONLY: &str = "DEDICATEDONLY";

/// Which kinds of hosts a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerPresence {
    #[default]
    AllServers,
    ClientServersOnly,
    DedicatedServersOnly,
}

/// A caller's session search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Upper bound on returned results; `0` leaves it to the backend.
    pub max_results: usize,
    pub use_lan: bool,
    pub server_type: ServerPresence,
    /// Game-defined constraints; these override the built-in flags on the
    /// same key.
    pub filters: Vec<FilterConstraint>,
    pub empty_only: bool,
    pub non_empty_only: bool,
    pub secure_only: bool,
    /// Minimum open slots; `0` disables the constraint.
    pub min_slots_available: i32,
}

impl SearchRequest {
    pub fn new(max_results: usize) -> Self {
        SearchRequest {
            max_results,
            ..Default::default()
        }
    }

    pub fn lan(mut self, use_lan: bool) -> Self {
        self.use_lan = use_lan;
        self
    }

    pub fn server_type(mut self, server_type: ServerPresence) -> Self {
        self.server_type = server_type;
        self
    }

    pub fn filter(mut self, constraint: FilterConstraint) -> Self {
        self.filters.push(constraint);
        self
    }

    pub fn empty_only(mut self) -> Self {
        self.empty_only = true;
        self
    }

    pub fn non_empty_only(mut self) -> Self {
        self.non_empty_only = true;
        self
    }

    pub fn secure_only(mut self) -> Self {
        self.secure_only = true;
        self
    }

    pub fn min_slots(mut self, slots: i32) -> Self {
        self.min_slots_available = slots;
        self
    }

    /// Builds the constraints the backend applies.
    ///
    /// Built-in flags come first in a fixed order. Each user filter is then
    /// set by key, so a user filter on a built-in key replaces both its value
    /// and its comparator.
    pub fn query_settings(&self) -> SearchFilter {
        let mut settings = SearchFilter::new();
        if self.empty_only {
            settings = settings.eq(SEARCH_EMPTY_SERVERS_ONLY, true);
        }
        if self.non_empty_only {
            settings = settings.eq(SEARCH_NONEMPTY_SERVERS_ONLY, true);
        }
        if self.secure_only {
            settings = settings.eq(SEARCH_SECURE_SERVERS_ONLY, true);
        }
        if self.min_slots_available != 0 {
            settings = settings.with(
                SEARCH_MINSLOTSAVAILABLE,
                Comparator::GreaterThanEquals,
                TypedValue::Int32(self.min_slots_available),
            );
        }
        settings = match self.server_type {
            ServerPresence::AllServers => settings,
            ServerPresence::ClientServersOnly => settings.eq(SEARCH_PRESENCE, true),
            ServerPresence::DedicatedServersOnly => settings.eq(SEARCH_DEDICATED_ONLY, true),
        };

        self.filters
            .iter()
            .cloned()
            .fold(settings, SearchFilter::set)
    }

    /// Builds the backend request.
    pub fn to_session_search(&self) -> SessionSearch {
        SessionSearch {
            max_search_results: self.max_results,
            is_lan_query: self.use_lan,
            query_settings: self.query_settings(),
        }
    }

    /// Narrows `results` locally with this request's user filters.
    pub fn filter_results(&self, results: Vec<SessionSearchResult>) -> Vec<SessionSearchResult> {
        sessionseek::filter_candidates(results, &self.filters)
    }
}

/// Result of [`find_sessions`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(Vec<SessionSearchResult>),
    Failure(OnlineError),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }

    /// Returns the results, empty on failure.
    pub fn results(&self) -> &[SessionSearchResult] {
        match self {
            SearchOutcome::Success(results) => results,
            SearchOutcome::Failure(_) => &[],
        }
    }

    pub fn into_results(self) -> Vec<SessionSearchResult> {
        match self {
            SearchOutcome::Success(results) => results,
            SearchOutcome::Failure(_) => Vec::new(),
        }
    }

    pub fn into_result(self) -> Result<Vec<SessionSearchResult>, OnlineError> {
        match self {
            SearchOutcome::Success(results) => Ok(results),
            SearchOutcome::Failure(err) => Err(err),
        }
    }
}

/// Runs `request` through the subsystem's session interface.
pub fn find_sessions(
    subsystem: &dyn OnlineSubsystem,
    player: &UniqueNetId,
    request: &SearchRequest,
) -> SearchOutcome {
    let Some(sessions) = subsystem.session_interface() else {
        tracing::warn!(
            subsystem = subsystem.name(),
            "find sessions failed: no session interface"
        );
        return SearchOutcome::Failure(OnlineError::InterfaceUnavailable("session"));
    };
    if !player.is_valid() {
        tracing::warn!("find sessions failed: invalid searching player");
        return SearchOutcome::Failure(OnlineError::InvalidUniqueId);
    }

    let search = request.to_session_search();
    tracing::debug!(
        max_results = search.max_search_results,
        lan = search.is_lan_query,
        constraints = search.query_settings.len(),
        "starting session search"
    );

    match sessions.find_sessions(player, &search) {
        Ok(results) => {
            for result in &results {
                tracing::debug!(session = %result.session_id, ping_ms = result.ping_ms, "session found");
            }
            SearchOutcome::Success(results)
        }
        Err(err) => {
            tracing::warn!(error = %err, "session search failed");
            SearchOutcome::Failure(err)
        }
    }
}
