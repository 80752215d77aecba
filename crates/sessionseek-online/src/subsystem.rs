use crate::identity::IdentityInterface;
use crate::session::SessionInterface;

/// Handle to the host's online services.
///
/// Callers pass a subsystem explicitly; there is no process-wide instance.
/// Either interface may be missing, for example when running offline.
pub trait OnlineSubsystem {
    /// Backend name, used in log output.
    fn name(&self) -> &str;

    fn session_interface(&self) -> Option<&dyn SessionInterface>;

    fn identity_interface(&self) -> Option<&dyn IdentityInterface>;

    /// Build id of the running game, compared against
    /// [`SessionSettings::build_unique_id`](crate::SessionSettings) to find
    /// compatible sessions. Backends without one report `0`.
    fn build_unique_id(&self) -> i32 {
        0
    }
}

/// Returns `true` when `subsystem` is the backend called `name`.
///
/// Backend names match ignoring ASCII case.
pub fn has_online_subsystem(subsystem: &dyn OnlineSubsystem, name: &str) -> bool {
    subsystem.name().eq_ignore_ascii_case(name)
}

/// Returns the build id of the running game.
pub fn current_build_unique_id(subsystem: &dyn OnlineSubsystem) -> i32 {
    let id = subsystem.build_unique_id();
    tracing::debug!(subsystem = subsystem.name(), build_unique_id = id, "current build id");
    id
}
