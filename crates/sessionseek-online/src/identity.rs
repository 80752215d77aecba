//! User privilege checks.

use serde::{Deserialize, Serialize};

use crate::error::OnlineError;
use crate::id::UniqueNetId;
use crate::subsystem::OnlineSubsystem;

/// Privileges a player can be checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPrivilege {
    CanPlay,
    CanPlayOnline,
    CanCommunicateOnline,
    CanUseUserGeneratedContent,
}

impl UserPrivilege {
    pub fn as_str(self) -> &'static str {
        match self {
            UserPrivilege::CanPlay => "can_play",
            UserPrivilege::CanPlayOnline => "can_play_online",
            UserPrivilege::CanCommunicateOnline => "can_communicate_online",
            UserPrivilege::CanUseUserGeneratedContent => "can_use_user_generated_content",
        }
    }
}

impl std::fmt::Display for UserPrivilege {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host identity service.
pub trait IdentityInterface {
    /// Checks `privilege` for `player`, returning the backend's result code.
    ///
    /// A code of `0` means the privilege is held.
    fn get_user_privilege(
        &self,
        player: &UniqueNetId,
        privilege: UserPrivilege,
    ) -> Result<u32, OnlineError>;
}

/// Outcome of a privilege check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeOutcome {
    /// The backend answered.
    Completed {
        privilege: UserPrivilege,
        granted: bool,
        code: u32,
    },
    /// The check could not be made.
    Failure(OnlineError),
}

impl PrivilegeOutcome {
    /// Builds the outcome for a backend result code.
    pub fn from_code(privilege: UserPrivilege, code: u32) -> Self {
        PrivilegeOutcome::Completed {
            privilege,
            granted: code == 0,
            code,
        }
    }

    /// Returns `true` only when the backend granted the privilege.
    pub fn is_granted(&self) -> bool {
        matches!(self, PrivilegeOutcome::Completed { granted: true, .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PrivilegeOutcome::Failure(_))
    }
}

/// Asks the identity service whether `player` holds `privilege`.
pub fn check_privilege(
    subsystem: &dyn OnlineSubsystem,
    player: &UniqueNetId,
    privilege: UserPrivilege,
) -> PrivilegeOutcome {
    let Some(identity) = subsystem.identity_interface() else {
        tracing::warn!(%privilege, "privilege check without an identity interface");
        return PrivilegeOutcome::Failure(OnlineError::InterfaceUnavailable("identity"));
    };
    if !player.is_valid() {
        tracing::warn!(%privilege, "privilege check for an invalid player id");
        return PrivilegeOutcome::Failure(OnlineError::InvalidUniqueId);
    }

    match identity.get_user_privilege(player, privilege) {
        Ok(code) => {
            tracing::debug!(%player, %privilege, code, "privilege check completed");
            PrivilegeOutcome::from_code(privilege, code)
        }
        Err(err) => {
            tracing::warn!(%player, %privilege, error = %err, "privilege check failed");
            PrivilegeOutcome::Failure(err)
        }
    }
}
