//! Application shell: resolves navigations against the route table, the
//! route gate and the shared session.

use std::sync::Arc;

use serde::Serialize;

use hrm_auth::gate::{self, GateDecision, Redirect};
use hrm_auth::{
    CredentialDirectory, Identity, KeyValueStore, Latency, LoginOutcome, Role, SessionStore,
};

use crate::forms::{LoginForm, SignupForm, ValidationError};
use crate::routes::{self, View};

/// What the shell should do for a requested path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    Render(View),
    /// Session is still loading; show the waiting indicator.
    Waiting,
    Redirect(Redirect),
}

/// Entry of the sidebar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

const STAFF_NAV: [NavItem; 5] = [
    NavItem {
        name: "Dashboard",
        href: "/dashboard",
    },
    NavItem {
        name: "Employees",
        href: "/dashboard/employees",
    },
    NavItem {
        name: "Leave Management",
        href: "/dashboard/leave",
    },
    NavItem {
        name: "Reports",
        href: "/dashboard/reports",
    },
    NavItem {
        name: "Settings",
        href: "/dashboard/settings",
    },
];

const EMPLOYEE_NAV: [NavItem; 3] = [
    NavItem {
        name: "My Portal",
        href: "/employee",
    },
    NavItem {
        name: "My Profile",
        href: "/employee/profile",
    },
    NavItem {
        name: "Settings",
        href: "/employee/settings",
    },
];

/// Result of submitting the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginSubmission {
    pub outcome: LoginOutcome,
    /// Where to go next; `None` keeps the user on the login screen.
    pub next: Option<Navigation>,
}

pub struct PortalShell<D, S, L> {
    session: Arc<SessionStore<D, S, L>>,
}

impl<D, S, L> Clone for PortalShell<D, S, L> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<D, S, L> PortalShell<D, S, L>
where
    D: CredentialDirectory,
    S: KeyValueStore,
    L: Latency,
{
    pub fn new(session: Arc<SessionStore<D, S, L>>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<SessionStore<D, S, L>> {
        &self.session
    }

    /// Restore the persisted session; call once at startup.
    pub fn start(&self) -> bool {
        self.session.restore()
    }

    /// Decide what to show for `path`.
    pub fn navigate(&self, path: &str) -> Navigation {
        let route = routes::resolve(path);
        let session = self.session.snapshot();

        let navigation = match route.view {
            View::Landing if session.loading => Navigation::Waiting,
            View::Landing => Navigation::Redirect(Redirect::replace(gate::landing_route(
                session.identity.as_ref(),
            ))),
            // Signed-in users are bounced off the login screen.
            View::Login if session.is_authenticated() => Navigation::Redirect(Redirect {
                to: "/",
                replace: false,
            }),
            view => match route.guard {
                None => Navigation::Render(view),
                Some(guard) => match guard.check(&session) {
                    GateDecision::Checking => Navigation::Waiting,
                    decision => decision
                        .redirect()
                        .map_or(Navigation::Render(view), Navigation::Redirect),
                },
            },
        };

        tracing::debug!(path, ?navigation, "navigation resolved");
        navigation
    }

    /// Validate and submit the login form. On success the user is sent
    /// through the landing route.
    pub async fn submit_login(&self, form: &LoginForm) -> LoginSubmission {
        if let Err(err) = form.validate() {
            return LoginSubmission {
                outcome: LoginOutcome::failure(err.to_string()),
                next: None,
            };
        }

        let outcome = self.session.login(&form.email, &form.password).await;
        let next = outcome.success.then(|| self.navigate("/"));
        LoginSubmission { outcome, next }
    }

    /// Validate the sign-up form. No account is created; on success the
    /// user is pointed at the dashboard, whose guard decides the rest.
    pub fn submit_signup(&self, form: &SignupForm) -> Result<Navigation, ValidationError> {
        form.validate()?;
        tracing::info!(email = %form.email, "sign-up form accepted");
        Ok(self.navigate(gate::DASHBOARD_PATH))
    }

    pub fn logout(&self) -> Navigation {
        self.session.logout();
        Navigation::Redirect(Redirect::replace(gate::LOGIN_PATH))
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.session.identity()
    }

    /// Sidebar entries for the signed-in user.
    pub fn sidebar(&self) -> &'static [NavItem] {
        match self.session.identity().map(|i| i.role) {
            Some(Role::Administrator | Role::Manager) => &STAFF_NAV,
            Some(Role::Employee) => &EMPLOYEE_NAV,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use hrm_auth::{InMemoryStore, NoLatency, StaticDirectory};

    use super::*;

    fn shell() -> PortalShell<StaticDirectory, InMemoryStore, NoLatency> {
        PortalShell::new(Arc::new(SessionStore::with_latency(
            StaticDirectory::demo().unwrap(),
            InMemoryStore::new(),
            NoLatency,
        )))
    }

    fn redirect(to: &'static str) -> Navigation {
        Navigation::Redirect(Redirect::replace(to))
    }

    #[test]
    fn everything_waits_before_restore() {
        let shell = shell();
        assert_eq!(shell.navigate("/"), Navigation::Waiting);
        assert_eq!(shell.navigate("/dashboard"), Navigation::Waiting);
        assert_eq!(shell.navigate("/employee"), Navigation::Waiting);
        // Public views do not depend on the session.
        assert_eq!(shell.navigate("/login"), Navigation::Render(View::Login));
    }

    #[test]
    fn signed_out_user_is_sent_to_login() {
        let shell = shell();
        shell.start();
        assert_eq!(shell.navigate("/"), redirect("/login"));
        assert_eq!(shell.navigate("/dashboard/reports"), redirect("/login"));
        assert_eq!(shell.navigate("/employee/profile"), redirect("/login"));
        assert_eq!(shell.navigate("/nowhere"), Navigation::Render(View::NotFound));
        assert!(shell.sidebar().is_empty());
    }

    #[tokio::test]
    async fn admin_lands_on_dashboard_and_is_kept_out_of_employee_portal() {
        let shell = shell();
        shell.start();

        let submission = shell
            .submit_login(&LoginForm::new("admin@hrm.com", "admin123"))
            .await;
        assert!(submission.outcome.success);
        assert_eq!(submission.next, Some(redirect("/dashboard")));

        assert_eq!(shell.navigate("/dashboard"), Navigation::Render(View::Dashboard));
        assert_eq!(
            shell.navigate("/dashboard/employees/E001/documents"),
            Navigation::Render(View::EmployeeDocuments {
                employee_id: "E001".to_string()
            })
        );
        assert_eq!(shell.navigate("/employee"), redirect("/unauthorized"));
        assert_eq!(shell.sidebar().len(), 5);
    }

    #[tokio::test]
    async fn employee_lands_on_portal() {
        let shell = shell();
        shell.start();

        let submission = shell
            .submit_login(&LoginForm::new("employee@hrm.com", "employee123"))
            .await;
        assert_eq!(submission.next, Some(redirect("/employee")));
        assert_eq!(shell.navigate("/employee/settings"), Navigation::Render(View::MySettings));
        // The dashboard subtree only requires a signed-in user.
        assert_eq!(shell.navigate("/dashboard/leave"), Navigation::Render(View::LeaveManagement));
        assert_eq!(shell.sidebar()[0].href, "/employee");
    }

    #[tokio::test]
    async fn login_screen_bounces_signed_in_users() {
        let shell = shell();
        shell.start();
        shell
            .submit_login(&LoginForm::new("manager@hrm.com", "manager123"))
            .await;

        assert_eq!(
            shell.navigate("/login"),
            Navigation::Redirect(Redirect {
                to: "/",
                replace: false
            })
        );

        assert_eq!(shell.logout(), redirect("/login"));
        assert_eq!(shell.navigate("/login"), Navigation::Render(View::Login));
        assert_eq!(shell.current_user(), None);
    }

    #[tokio::test]
    async fn invalid_forms_never_reach_the_session() {
        let shell = shell();
        shell.start();

        let submission = shell.submit_login(&LoginForm::new("admin@hrm.com", "")).await;
        assert_eq!(submission.outcome.message, "Please fill in all fields");
        assert_eq!(submission.next, None);

        let submission = shell
            .submit_login(&LoginForm::new("admin@hrm.com", "wrong"))
            .await;
        assert_eq!(submission.outcome.message, "Invalid email or password");
        assert_eq!(submission.next, None);
    }

    #[test]
    fn signup_validates_then_defers_to_dashboard_guard() {
        let shell = shell();
        shell.start();

        let form = SignupForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@hrm.com".to_string(),
            password: "analytical".to_string(),
            confirm_password: "analytical".to_string(),
        };
        assert_eq!(shell.submit_signup(&form), Ok(redirect("/login")));

        let mismatch = SignupForm {
            confirm_password: "different".to_string(),
            ..form
        };
        assert_eq!(
            shell.submit_signup(&mismatch),
            Err(ValidationError::PasswordMismatch)
        );
    }
}
