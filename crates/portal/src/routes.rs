//! Route table of the portal.
//!
//! Maps a request path to the view it shows and the guard protecting it.

use serde::Serialize;

use hrm_auth::{Role, RouteGuard};

/// A screen of the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// `/`: never rendered, resolved through the role-based landing route.
    Landing,
    Login,
    Signup,
    Dashboard,
    EmployeeDirectory,
    EmployeeProfile { employee_id: String },
    EmployeeDocuments { employee_id: String },
    LeaveManagement,
    Reports,
    Settings,
    EmployeePortal,
    MyProfile,
    MySettings,
    Unauthorized,
    NotFound,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Landing => "Home",
            View::Login => "Sign In",
            View::Signup => "Create Account",
            View::Dashboard => "Dashboard",
            View::EmployeeDirectory => "Employees",
            View::EmployeeProfile { .. } | View::MyProfile => "Employee Profile",
            View::EmployeeDocuments { .. } => "Employee Documents",
            View::LeaveManagement => "Leave Management",
            View::Reports => "Reports",
            View::Settings | View::MySettings => "Settings",
            View::EmployeePortal => "Employee Portal",
            View::Unauthorized => "Unauthorized Access",
            View::NotFound => "Page Not Found",
        }
    }
}

/// A path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub view: View,
    /// `None` for public views.
    pub guard: Option<RouteGuard>,
}

impl ResolvedRoute {
    fn public(view: View) -> Self {
        Self { view, guard: None }
    }

    fn authenticated(view: View) -> Self {
        Self {
            view,
            guard: Some(RouteGuard::AUTHENTICATED),
        }
    }

    fn employee_only(view: View) -> Self {
        Self {
            view,
            guard: Some(RouteGuard::role(Role::Employee)),
        }
    }
}

/// Resolve a request path.
///
/// Query strings, fragments, repeated and trailing slashes are ignored.
pub fn resolve(path: &str) -> ResolvedRoute {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => ResolvedRoute::public(View::Landing),
        ["login"] => ResolvedRoute::public(View::Login),
        ["signup"] => ResolvedRoute::public(View::Signup),
        ["unauthorized"] => ResolvedRoute::public(View::Unauthorized),

        ["dashboard"] => ResolvedRoute::authenticated(View::Dashboard),
        ["dashboard", "employees"] => ResolvedRoute::authenticated(View::EmployeeDirectory),
        ["dashboard", "employees", id] => ResolvedRoute::authenticated(View::EmployeeProfile {
            employee_id: (*id).to_string(),
        }),
        ["dashboard", "employees", id, "documents"] => {
            ResolvedRoute::authenticated(View::EmployeeDocuments {
                employee_id: (*id).to_string(),
            })
        }
        ["dashboard", "leave"] => ResolvedRoute::authenticated(View::LeaveManagement),
        ["dashboard", "reports"] => ResolvedRoute::authenticated(View::Reports),
        ["dashboard", "settings"] => ResolvedRoute::authenticated(View::Settings),

        ["employee"] => ResolvedRoute::employee_only(View::EmployeePortal),
        ["employee", "profile"] => ResolvedRoute::employee_only(View::MyProfile),
        ["employee", "settings"] => ResolvedRoute::employee_only(View::MySettings),

        _ => ResolvedRoute::public(View::NotFound),
    }
}

/// Every routable path pattern with its guard, for listings.
pub fn table() -> Vec<(&'static str, Option<RouteGuard>)> {
    [
        "/",
        "/login",
        "/signup",
        "/dashboard",
        "/dashboard/employees",
        "/dashboard/employees/:id",
        "/dashboard/employees/:id/documents",
        "/dashboard/leave",
        "/dashboard/reports",
        "/dashboard/settings",
        "/employee",
        "/employee/profile",
        "/employee/settings",
        "/unauthorized",
    ]
    .into_iter()
    .map(|pattern| (pattern, resolve(pattern).guard))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert_eq!(resolve("/"), ResolvedRoute::public(View::Landing));
        assert_eq!(resolve(""), ResolvedRoute::public(View::Landing));
        assert_eq!(resolve("/login"), ResolvedRoute::public(View::Login));
        assert_eq!(resolve("/signup/"), ResolvedRoute::public(View::Signup));
        assert_eq!(resolve("/unauthorized"), ResolvedRoute::public(View::Unauthorized));
    }

    #[test]
    fn dashboard_subtree_needs_any_signed_in_user() {
        for path in [
            "/dashboard",
            "/dashboard/employees",
            "/dashboard/leave",
            "/dashboard/reports?range=q1",
            "/dashboard/settings#theme",
        ] {
            assert_eq!(resolve(path).guard, Some(RouteGuard::AUTHENTICATED), "{path}");
        }
    }

    #[test]
    fn employee_ids_are_captured() {
        assert_eq!(
            resolve("/dashboard/employees/E001").view,
            View::EmployeeProfile {
                employee_id: "E001".to_string()
            }
        );
        assert_eq!(
            resolve("//dashboard//employees/E002/documents/").view,
            View::EmployeeDocuments {
                employee_id: "E002".to_string()
            }
        );
    }

    #[test]
    fn employee_subtree_needs_employee_role() {
        for path in ["/employee", "/employee/profile", "/employee/settings"] {
            assert_eq!(resolve(path).guard, Some(RouteGuard::role(Role::Employee)));
        }
    }

    #[test]
    fn unknown_paths_are_not_found_and_public() {
        for path in ["/employees", "/dashboard/unknown", "/employee/leave/1", "/admin"] {
            assert_eq!(resolve(path), ResolvedRoute::public(View::NotFound), "{path}");
        }
    }

    #[test]
    fn table_lists_every_pattern_with_its_guard() {
        let table = table();
        assert_eq!(table.len(), 14);
        assert!(table.iter().all(|(pattern, _)| resolve(pattern).view != View::NotFound));
        assert_eq!(
            table.iter().filter(|(_, guard)| guard.is_some()).count(),
            10
        );
    }
}
