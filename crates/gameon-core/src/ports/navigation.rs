use crate::route::Route;

/// Navigation host.
///
/// Calls are synchronous: the host updates its stack immediately and renders
/// on its own schedule.
pub trait NavigationPort: Send + Sync {
    fn current_route(&self) -> Route;

    /// Navigate to `route`, replacing the current history entry.
    fn replace(&self, route: Route);

    fn push(&self, route: Route);

    /// Pops one entry. Returns `false` when already at the root.
    fn back(&self) -> bool;
}
