//! Route authorization gate.
//!
//! Pure decisions over a [`SessionState`]: no IO, no panics, no state of its
//! own. The gate is re-evaluated on every render; a `Checking` decision is
//! never remembered between renders.

use serde::Serialize;

use crate::session::SessionState;
use crate::{Identity, Role};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const EMPLOYEE_PORTAL_PATH: &str = "/employee";

/// A navigation the caller must perform instead of rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: &'static str,
    /// Replace the current history entry, so "back" cannot return to the
    /// denied page.
    pub replace: bool,
}

impl Redirect {
    pub const fn replace(to: &'static str) -> Self {
        Self { to, replace: true }
    }
}

/// Outcome of evaluating a guard against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// Session is still loading: show a waiting indicator, do not redirect.
    Checking,
    /// Nobody is signed in.
    Denied,
    /// Signed in, but with the wrong role.
    Forbidden,
    /// Render the guarded view.
    Admitted,
}

impl GateDecision {
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            GateDecision::Denied => Some(Redirect::replace(LOGIN_PATH)),
            GateDecision::Forbidden => Some(Redirect::replace(UNAUTHORIZED_PATH)),
            GateDecision::Checking | GateDecision::Admitted => None,
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, GateDecision::Admitted)
    }
}

/// Guard attached to a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RouteGuard {
    pub required_role: Option<Role>,
}

impl RouteGuard {
    /// Any signed-in user.
    pub const AUTHENTICATED: RouteGuard = RouteGuard {
        required_role: None,
    };

    pub const fn role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    pub fn check(&self, session: &SessionState) -> GateDecision {
        check_access(session, self.required_role)
    }
}

/// Decide whether a view guarded by `required_role` may render.
pub fn check_access(session: &SessionState, required_role: Option<Role>) -> GateDecision {
    if session.loading {
        return GateDecision::Checking;
    }

    let Some(identity) = &session.identity else {
        return GateDecision::Denied;
    };

    match required_role {
        Some(role) if identity.role != role => {
            tracing::debug!(
                user_id = %identity.id,
                role = %identity.role,
                required = %role,
                "route forbidden"
            );
            GateDecision::Forbidden
        }
        _ => GateDecision::Admitted,
    }
}

/// Where a user lands right after authenticating (and on `/`).
pub fn landing_route(identity: Option<&Identity>) -> &'static str {
    match identity.map(|i| i.role) {
        Some(Role::Administrator | Role::Manager) => DASHBOARD_PATH,
        Some(Role::Employee) => EMPLOYEE_PORTAL_PATH,
        None => LOGIN_PATH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CredentialDirectory, StaticDirectory};

    fn signed_in(email: &str) -> SessionState {
        let directory = StaticDirectory::demo().unwrap();
        SessionState::signed_in(directory.lookup_identity(email).unwrap().clone())
    }

    #[test]
    fn loading_session_is_checking_whatever_the_guard() {
        let mut session = signed_in("admin@hrm.com");
        session.loading = true;
        for required in [None, Some(Role::Employee), Some(Role::Administrator)] {
            let decision = check_access(&session, required);
            assert_eq!(decision, GateDecision::Checking);
            assert_eq!(decision.redirect(), None);
        }
        assert_eq!(
            check_access(&SessionState::initializing(), None),
            GateDecision::Checking
        );
    }

    #[test]
    fn employee_scenarios() {
        let session = signed_in("employee@hrm.com");
        assert_eq!(
            check_access(&session, Some(Role::Employee)),
            GateDecision::Admitted
        );
        assert_eq!(check_access(&session, None), GateDecision::Admitted);

        let decision = check_access(&session, Some(Role::Administrator));
        assert_eq!(decision, GateDecision::Forbidden);
        assert_eq!(decision.redirect(), Some(Redirect::replace("/unauthorized")));
    }

    #[test]
    fn signed_out_is_sent_to_login() {
        let session = SessionState::signed_out();
        for required in [None, Some(Role::Employee), Some(Role::Manager)] {
            let decision = RouteGuard { required_role: required }.check(&session);
            assert_eq!(decision, GateDecision::Denied);
            assert_eq!(
                decision.redirect(),
                Some(Redirect {
                    to: "/login",
                    replace: true
                })
            );
        }
    }

    #[test]
    fn staff_are_not_admitted_to_employee_only_views() {
        let guard = RouteGuard::role(Role::Employee);
        assert_eq!(guard.check(&signed_in("admin@hrm.com")), GateDecision::Forbidden);
        assert_eq!(guard.check(&signed_in("manager@hrm.com")), GateDecision::Forbidden);
        assert!(RouteGuard::AUTHENTICATED
            .check(&signed_in("manager@hrm.com"))
            .is_admitted());
    }

    #[test]
    fn landing_route_by_role() {
        let directory = StaticDirectory::demo().unwrap();
        let landing = |email: &str| landing_route(directory.lookup_identity(email));

        assert_eq!(landing("admin@hrm.com"), "/dashboard");
        assert_eq!(landing("manager@hrm.com"), "/dashboard");
        assert_eq!(landing("employee@hrm.com"), "/employee");
        assert_eq!(landing_route(None), "/login");
    }
}
