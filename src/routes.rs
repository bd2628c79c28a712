//! Navigable surfaces of the site and the navigation seam used for redirects.

use std::fmt;
use std::sync::Mutex;

use tracing::info;

use crate::lock;

const LOGIN_PATH: &str = "/mjx-admin-login-secure-2025";
const DASHBOARD_PATH: &str = "/mjx-admin-dashboard-secure-2025";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    AdminDashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => LOGIN_PATH,
            Route::AdminDashboard => DASHBOARD_PATH,
        }
    }

    /// Unknown paths fall back to the home page.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            LOGIN_PATH => Route::Login,
            DASHBOARD_PATH => Route::AdminDashboard,
            _ => Route::Home,
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::AdminDashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Moves the user to another surface. The request interceptor and the route
/// guard only ever redirect through this trait.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every destination in order.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    visited: Mutex<Vec<Route>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        lock::lock(&self.visited, "navigation.current").last().copied()
    }

    pub fn visited(&self) -> Vec<Route> {
        lock::lock(&self.visited, "navigation.visited").clone()
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, route: Route) {
        info!(route = route.path(), "Navigating");
        lock::lock(&self.visited, "navigation.navigate").push(route);
    }
}
