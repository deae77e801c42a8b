//! Role-gated access guards.
//!
//! The role comes from the session store populated at login - not from a
//! hard-coded value - so gating follows whoever is actually signed in.
//! A guard either allows the gated surface or redirects to the login
//! route; there is no third outcome.

use ticketgate_core::Role;

use crate::session::SessionStore;

/// Route the login redirect points at.
pub const LOGIN_ROUTE: &str = "/login";

/// Result of evaluating a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the gated surface.
    Allow,
    /// Send the user to the login route.
    RedirectToLogin,
}

impl GuardOutcome {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Allow only an authenticated user whose role satisfies one of `required`.
///
/// Unauthenticated sessions and role mismatches both redirect to login.
/// `Admin` satisfies every requirement.
#[must_use]
pub fn require_role(session: &SessionStore, required: &[Role]) -> GuardOutcome {
    if !session.is_authenticated() {
        return GuardOutcome::RedirectToLogin;
    }
    match session.role() {
        Some(role) if required.iter().any(|r| role.satisfies(*r)) => GuardOutcome::Allow,
        _ => GuardOutcome::RedirectToLogin,
    }
}

/// Allow any authenticated user.
#[must_use]
pub fn require_auth(session: &SessionStore) -> GuardOutcome {
    if session.is_authenticated() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectToLogin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ticketgate_core::{Email, UserId};

    use crate::session::SessionUser;

    fn logged_in(role: Role) -> SessionStore {
        let store = SessionStore::in_memory();
        store
            .apply_login(
                "tok".to_string(),
                SessionUser {
                    id: UserId::new(1),
                    email: Email::parse("user@example.com").unwrap(),
                    role,
                    display_name: "User".to_string(),
                },
            )
            .unwrap();
        store
    }

    #[test]
    fn test_anonymous_redirects() {
        let store = SessionStore::in_memory();
        assert_eq!(
            require_role(&store, &[Role::Attendee]),
            GuardOutcome::RedirectToLogin
        );
        assert_eq!(require_auth(&store), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn test_matching_role_allows() {
        let store = logged_in(Role::Staff);
        assert_eq!(require_role(&store, &[Role::Staff]), GuardOutcome::Allow);
    }

    #[test]
    fn test_role_mismatch_redirects() {
        let store = logged_in(Role::Attendee);
        assert_eq!(
            require_role(&store, &[Role::Organizer]),
            GuardOutcome::RedirectToLogin
        );
    }

    #[test]
    fn test_admin_passes_any_guard() {
        let store = logged_in(Role::Admin);
        assert_eq!(require_role(&store, &[Role::Staff]), GuardOutcome::Allow);
        assert_eq!(
            require_role(&store, &[Role::Organizer]),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_multiple_accepted_roles() {
        let store = logged_in(Role::Organizer);
        assert_eq!(
            require_role(&store, &[Role::Staff, Role::Organizer]),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_logout_revokes_access() {
        let store = logged_in(Role::Staff);
        store.logout().unwrap();
        assert_eq!(
            require_role(&store, &[Role::Staff]),
            GuardOutcome::RedirectToLogin
        );
    }
}
