//! Hash Router
//!
//! Routes live in the location hash (`#/projects/new`) so the app can be
//! served as static files. [`Route`] is the typed form of a path; the
//! [`Navigator`] keeps the current route in a signal and the hash in sync.

use leptos::ev;
use leptos::prelude::*;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::{debug, warn};

use crate::api::segment;
use crate::store::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login { return_url: Option<String> },
    Register,
    ForgotPassword,
    ResetPassword { token: Option<String> },
    Dashboard,
    Projects,
    ProjectNew,
    ProjectEdit(String),
    Tasks,
    TaskNew,
    TaskEdit(String),
    Kanban,
    Profile,
    Notifications,
    Admin,
    AdminUsers,
    NotFound(String),
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

/// First value of `key` in a query string, decoded; blank counts as absent
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| decode(&v.replace('+', " ")))
        .filter(|v| !v.is_empty())
}

impl Route {
    /// Parse a path with optional query, with or without the leading `#`
    pub fn parse(target: &str) -> Route {
        let target = target.trim_start_matches('#');
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["auth"] | ["auth", "login"] => Route::Login {
                return_url: query_param(query, "returnUrl"),
            },
            ["auth", "register"] => Route::Register,
            ["auth", "forgot-password"] => Route::ForgotPassword,
            ["auth", "reset-password"] => Route::ResetPassword {
                token: query_param(query, "token"),
            },
            ["auth", "reset-password", token] => Route::ResetPassword {
                token: Some(decode(token)),
            },
            ["dashboard"] => Route::Dashboard,
            ["projects"] => Route::Projects,
            ["projects", "new"] => Route::ProjectNew,
            ["projects", id] => Route::ProjectEdit(decode(id)),
            ["tasks"] => Route::Tasks,
            ["tasks", "new"] => Route::TaskNew,
            ["tasks", id] => Route::TaskEdit(decode(id)),
            ["kanban"] => Route::Kanban,
            ["profile"] => Route::Profile,
            ["notifications"] => Route::Notifications,
            ["admin"] => Route::Admin,
            ["admin", "users"] => Route::AdminUsers,
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Canonical path, including the query where the route carries one
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { return_url: None } => "/auth/login".to_string(),
            Route::Login { return_url: Some(url) } => format!("/auth/login?returnUrl={}", encode(url)),
            Route::Register => "/auth/register".to_string(),
            Route::ForgotPassword => "/auth/forgot-password".to_string(),
            Route::ResetPassword { token: None } => "/auth/reset-password".to_string(),
            Route::ResetPassword { token: Some(t) } => format!("/auth/reset-password?token={}", encode(t)),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectNew => "/projects/new".to_string(),
            Route::ProjectEdit(id) => format!("/projects/{}", segment(id)),
            Route::Tasks => "/tasks".to_string(),
            Route::TaskNew => "/tasks/new".to_string(),
            Route::TaskEdit(id) => format!("/tasks/{}", segment(id)),
            Route::Kanban => "/kanban".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Route::Home
                | Route::Login { .. }
                | Route::Register
                | Route::ForgotPassword
                | Route::ResetPassword { .. }
                | Route::NotFound(_)
        )
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin | Route::AdminUsers)
    }
}

/// Guard outcome for a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Session check still running
    Pending,
    Redirect(Route),
}

pub fn check_access(route: &Route, status: SessionStatus, is_admin: bool) -> Access {
    if !route.requires_auth() {
        return Access::Granted;
    }
    match status {
        SessionStatus::Checking => Access::Pending,
        SessionStatus::Anonymous => Access::Redirect(Route::Login {
            return_url: Some(route.path()),
        }),
        SessionStatus::Authenticated if route.requires_admin() && !is_admin => Access::Redirect(Route::Dashboard),
        SessionStatus::Authenticated => Access::Granted,
    }
}

/// Current route plus hash synchronisation
#[derive(Clone, Copy)]
pub struct Navigator {
    route: RwSignal<Route>,
}

fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}

impl Navigator {
    /// Read the initial route from the hash and follow later hash changes
    pub fn new() -> Self {
        let nav = Self {
            route: RwSignal::new(Route::parse(&current_hash())),
        };
        let handle = window_event_listener(ev::hashchange, move |_| {
            let route = Route::parse(&current_hash());
            if nav.route.try_get_untracked().as_ref() != Some(&route) {
                debug!("route changed to {}", route.path());
                nav.route.set(route);
            }
        });
        on_cleanup(move || handle.remove());
        nav
    }

    pub fn route(&self) -> Route {
        self.route.get()
    }

    /// Switch route and push the matching hash
    pub fn navigate(&self, route: Route) {
        let hash = route.href();
        if let Err(e) = window().location().set_hash(&hash) {
            warn!("failed to set location hash: {:?}", e);
        }
        self.route.set(route);
    }

    /// Navigate to an in-app path such as a `returnUrl`
    pub fn navigate_path(&self, path: &str) {
        self.navigate(Route::parse(path));
    }
}

/// Get the navigator from context
pub fn use_navigator() -> Navigator {
    expect_context::<Navigator>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/projects/new"), Route::ProjectNew);
        assert_eq!(Route::parse("/projects/abc123"), Route::ProjectEdit("abc123".into()));
        assert_eq!(Route::parse("/tasks/t%201"), Route::TaskEdit("t 1".into()));
        assert_eq!(Route::parse("/admin/users/"), Route::AdminUsers);
        assert_eq!(
            Route::parse("/auth/reset-password?token=abc"),
            Route::ResetPassword { token: Some("abc".into()) }
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::parse("/demo"), Route::NotFound("/demo".into()));
        assert_eq!(Route::parse("/projects/1/extra"), Route::NotFound("/projects/1/extra".into()));
    }

    #[test]
    fn test_return_url_roundtrip() {
        let login = Route::Login { return_url: Some("/projects/p1?x=1".into()) };
        let path = login.path();
        assert!(!path[path.find('?').unwrap() + 1..].contains('/'));
        assert_eq!(Route::parse(&path), login);
        assert_eq!(Route::parse("/auth/login?returnUrl="), Route::Login { return_url: None });
    }

    #[test]
    fn test_paths_parse_back() {
        let routes = [
            Route::Home,
            Route::Dashboard,
            Route::Projects,
            Route::ProjectEdit("p1".into()),
            Route::TaskNew,
            Route::Kanban,
            Route::Notifications,
            Route::Admin,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.href()), route);
        }
    }

    #[test]
    fn test_guard_redirects_anonymous_to_login() {
        let route = Route::TaskEdit("t1".into());
        assert_eq!(
            check_access(&route, SessionStatus::Anonymous, false),
            Access::Redirect(Route::Login { return_url: Some("/tasks/t1".into()) })
        );
        assert_eq!(check_access(&route, SessionStatus::Checking, false), Access::Pending);
        assert_eq!(check_access(&route, SessionStatus::Authenticated, false), Access::Granted);
        assert_eq!(check_access(&Route::Home, SessionStatus::Anonymous, false), Access::Granted);
    }

    #[test]
    fn test_admin_guard() {
        assert_eq!(
            check_access(&Route::AdminUsers, SessionStatus::Authenticated, false),
            Access::Redirect(Route::Dashboard)
        );
        assert_eq!(check_access(&Route::Admin, SessionStatus::Authenticated, true), Access::Granted);
        assert!(matches!(
            check_access(&Route::Admin, SessionStatus::Anonymous, true),
            Access::Redirect(Route::Login { .. })
        ));
    }
}
