use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::routes::{Navigator, Route};
use crate::session::{Session, SessionStore};

/// Navigation was refused and the user was sent to `to` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access to {from} requires signing in; redirected to {to}")]
pub struct Redirect {
    pub from: Route,
    pub to: Route,
}

/// Gates protected routes on the presence of a persisted credential.
#[derive(Clone)]
pub struct RouteGuard {
    sessions: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(sessions: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            sessions,
            navigator,
        }
    }

    pub fn can_activate(&self, route: Route) -> bool {
        !route.requires_auth() || self.session().is_some()
    }

    /// Build the view for `route` only if it may be entered; otherwise redirect
    /// to the login surface without calling `build`.
    pub fn activate<V>(
        &self,
        route: Route,
        build: impl FnOnce(Option<Session>) -> V,
    ) -> Result<V, Redirect> {
        let session = self.session();
        if route.requires_auth() && session.is_none() {
            debug!(route = route.path(), "Guard refused anonymous navigation");
            self.navigator.navigate(Route::Login);
            return Err(Redirect {
                from: route,
                to: Route::Login,
            });
        }
        self.navigator.navigate(route);
        Ok(build(session))
    }

    fn session(&self) -> Option<Session> {
        self.sessions.get().unwrap_or_else(|err| {
            warn!(error = %err, "Session unreadable; guard treats request as anonymous");
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::NavigationHistory;
    use crate::session::MemorySessionStore;
    use majex_api_types::User;

    fn admin() -> Session {
        Session {
            token: "t".into(),
            user: User {
                id: 1,
                name: "Admin".into(),
                email: "admin@majex.test".into(),
            },
        }
    }

    #[test]
    fn anonymous_dashboard_access_redirects_before_building() {
        let history = Arc::new(NavigationHistory::new());
        let guard = RouteGuard::new(Arc::new(MemorySessionStore::new()), history.clone());

        let mut built = false;
        let outcome = guard.activate(Route::AdminDashboard, |_| built = true);

        assert_eq!(
            outcome,
            Err(Redirect {
                from: Route::AdminDashboard,
                to: Route::Login
            })
        );
        assert!(!built);
        assert_eq!(history.current(), Some(Route::Login));
        assert!(!guard.can_activate(Route::AdminDashboard));
    }

    #[test]
    fn signed_in_admin_enters_dashboard() {
        let history = Arc::new(NavigationHistory::new());
        let guard = RouteGuard::new(
            Arc::new(MemorySessionStore::with_session(admin())),
            history.clone(),
        );

        let user = guard
            .activate(Route::AdminDashboard, |session| session.map(|s| s.user.name))
            .expect("allowed");

        assert_eq!(user.as_deref(), Some("Admin"));
        assert_eq!(history.current(), Some(Route::AdminDashboard));
    }

    #[test]
    fn public_routes_never_need_a_session() {
        let guard = RouteGuard::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(NavigationHistory::new()),
        );
        assert!(guard.can_activate(Route::Home));
        assert!(guard.activate(Route::Login, |_| ()).is_ok());
    }
}
