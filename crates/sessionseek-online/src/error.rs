//! Error types for the online boundary.

use thiserror::Error;

/// Errors reported by, or about, the host online subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnlineError {
    /// The subsystem does not provide the requested interface.
    #[error("{0} interface is not available")]
    InterfaceUnavailable(&'static str),

    /// No session is registered under the given name.
    #[error("no session named '{0}'")]
    SessionNotFound(String),

    /// The backend reported a failed search.
    #[error("session search failed: {0}")]
    SearchFailed(String),

    /// The player id is missing or malformed.
    #[error("invalid unique net id")]
    InvalidUniqueId,
}

impl OnlineError {
    pub fn search_failed(msg: impl Into<String>) -> Self {
        Self::SearchFailed(msg.into())
    }
}
