use std::sync::{Mutex, MutexGuard, PoisonError};

use gameon_core::ports::NavigationPort;
use gameon_core::Route;
use tracing::debug;

/// In-memory navigation stack.
pub struct StackNavigator {
    stack: Mutex<Vec<Route>>,
}

impl StackNavigator {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: Mutex::new(vec![initial]),
        }
    }

    pub fn history(&self) -> Vec<Route> {
        self.stack().clone()
    }

    fn stack(&self) -> MutexGuard<'_, Vec<Route>> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NavigationPort for StackNavigator {
    fn current_route(&self) -> Route {
        self.stack().last().copied().unwrap_or(Route::Home)
    }

    fn replace(&self, route: Route) {
        let mut stack = self.stack();
        stack.pop();
        stack.push(route);
        debug!(route = %route, "navigation replace");
    }

    fn push(&self, route: Route) {
        self.stack().push(route);
        debug!(route = %route, "navigation push");
    }

    fn back(&self) -> bool {
        let mut stack = self.stack();
        if stack.len() < 2 {
            return false;
        }
        stack.pop();
        debug!(route = ?stack.last(), "navigation back");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_and_replace() {
        let nav = StackNavigator::new(Route::Home);
        nav.push(Route::Preferences);
        assert_eq!(nav.current_route(), Route::Preferences);

        assert!(nav.back());
        assert!(!nav.back());
        assert_eq!(nav.current_route(), Route::Home);

        nav.replace(Route::Login);
        assert_eq!(nav.history(), vec![Route::Login]);
    }
}
