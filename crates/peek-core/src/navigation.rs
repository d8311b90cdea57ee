// ── Navigation ──
//
// Views never redirect on their own; they ask a `Navigator`. A browser
// shell would push history entries, the CLI just records where the user
// was sent and reacts after the command finishes.

use std::sync::Mutex;

use serde::Serialize;
use strum::{Display, EnumString};

/// Destinations the frontend can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Screens,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Screens => "/screens",
        }
    }
}

/// Receiver of navigation requests.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only remembers the routes it was asked for.
#[derive(Debug, Default)]
pub struct History {
    routes: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route requested so far, oldest first.
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// The most recent route, if any.
    pub fn current(&self) -> Option<Route> {
        self.routes.lock().ok().and_then(|r| r.last().copied())
    }

    /// How many times `route` was requested.
    pub fn count(&self, route: Route) -> usize {
        self.routes
            .lock()
            .map(|r| r.iter().filter(|&&seen| seen == route).count())
            .unwrap_or(0)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, path = route.path(), "navigating");
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn history_records_in_order() {
        let history = History::new();
        history.navigate(Route::Dashboard);
        history.navigate(Route::Login);

        assert_eq!(history.routes(), vec![Route::Dashboard, Route::Login]);
        assert_eq!(history.current(), Some(Route::Login));
        assert_eq!(history.count(Route::Login), 1);
        assert_eq!(history.count(Route::Screens), 0);
    }

    #[test]
    fn route_round_trips_through_strings() {
        assert_eq!(Route::Screens.to_string(), "screens");
        assert_eq!("login".parse::<Route>().unwrap(), Route::Login);
    }
}
