//! Client-side routing
//!
//! Maps paths to views and keeps a navigation history. Paths that match no
//! route resolve to [`Route::Home`].

use std::fmt;

/// A view the application can show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Account,
    NewEvent,
    EditEvent(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["account"] => Route::Account,
            ["events", "new"] => Route::NewEvent,
            ["events", id, "edit"] => Route::EditEvent((*id).to_string()),
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/".to_string(),
            Route::Account => "/account".to_string(),
            Route::NewEvent => "/events/new".to_string(),
            Route::EditEvent(id) => format!("/events/{}/edit", id),
        }
    }

    /// Routes that only make sense for a signed-in user
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Account | Route::NewEvent | Route::EditEvent(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Log in",
            Route::Home => "Events",
            Route::Account => "Account",
            Route::NewEvent => "New event",
            Route::EditEvent(_) => "Edit event",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the routes visited before it
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Navigate to `route`. Pushing the current route again is a no-op.
    pub fn push(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::debug!(from = %self.current, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    pub fn push_path(&mut self, path: &str) {
        self.push(Route::parse(path));
    }

    /// Return to the previous route, if any
    pub fn back(&mut self) -> Option<&Route> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(&self.current)
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }
}
