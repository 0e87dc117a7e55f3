//! Session gate: keeps the visible route consistent with the auth state.
//! 会话门：保持可见路由与认证状态一致。

use std::sync::Arc;

use gameon_core::ports::{AuthSubscription, NavigationPort};
use gameon_core::{AuthStateChange, AuthUser, SessionEvent, SessionState, SessionStateMachine};
use gameon_core::{SessionAction, UserId};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

/// Observes the auth provider and redirects the navigation host.
///
/// The gate never creates or destroys sessions. It folds auth events into a
/// [`SessionState`] through [`SessionStateMachine`] and executes the resulting
/// `ReplaceRoute` actions. The current state is published through a `watch`
/// channel so screens can ask for the signed-in user.
///
/// 会话门只观察认证事件，不修改会话。
pub struct SessionGate {
    navigation: Arc<dyn NavigationPort>,
    state: watch::Sender<SessionState>,
}

impl SessionGate {
    pub fn new(navigation: Arc<dyn NavigationPort>) -> Self {
        let (state, _) = watch::channel(SessionState::Unresolved);
        Self { navigation, state }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().user().cloned()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.state.borrow().user_id().cloned()
    }

    /// Applies one auth event and returns the resulting state.
    pub fn handle_auth_change(&self, change: AuthStateChange) -> SessionState {
        self.dispatch(SessionEvent::AuthChanged(change))
    }

    /// Re-checks the current route after the user navigated.
    pub fn handle_route_change(&self) -> SessionState {
        self.dispatch(SessionEvent::RouteChanged)
    }

    fn dispatch(&self, event: SessionEvent) -> SessionState {
        let span = info_span!("usecase.session_gate.dispatch", event = ?event);
        let _guard = span.enter();

        // Redirects run inside the update: subscribers are notified only
        // after the route has moved.
        self.state.send_modify(|state| {
            let current_route = self.navigation.current_route();
            let (next, actions) =
                SessionStateMachine::transition(state.clone(), event, current_route);
            if *state != next {
                info!(from = ?state, to = ?next, "session state changed");
            }
            *state = next;

            for action in actions {
                match action {
                    SessionAction::ReplaceRoute(route) => {
                        info!(from = %current_route, to = %route, "redirecting");
                        self.navigation.replace(route);
                    }
                }
            }
        });

        self.state()
    }

    /// Consumes the auth stream in order until it ends or `shutdown` fires.
    ///
    /// A stream that ends before delivering anything leaves the gate
    /// `Unresolved`, so nothing is rendered.
    pub async fn run(&self, mut subscription: AuthSubscription, shutdown: CancellationToken) {
        async {
            info!("session gate started");
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        debug!("session gate shutdown requested");
                        break;
                    }
                    change = subscription.next() => match change {
                        Some(change) => {
                            self.handle_auth_change(change);
                        }
                        None => {
                            if !self.state.borrow().is_resolved() {
                                warn!("auth stream ended before the session resolved");
                            } else {
                                debug!("auth stream ended");
                            }
                            break;
                        }
                    }
                }
            }
            subscription.unsubscribe();
            info!("session gate stopped");
        }
        .instrument(info_span!("usecase.session_gate.run"))
        .await
    }
}
