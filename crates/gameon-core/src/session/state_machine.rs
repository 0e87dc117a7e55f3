//! Session gate state machine.
//!
//! Defines a pure state transition function for auth-gated navigation.

use crate::auth::{AuthStateChange, AuthUser};
use crate::ids::UserId;
use crate::route::{Route, RouteClass};

/// Session state as observed from the auth provider.
///
/// 会话状态（仅观察认证提供方）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Initial auth state not yet delivered. Nothing is rendered.
    ///
    /// 初始认证状态尚未到达，不渲染任何页面。
    #[default]
    Unresolved,
    /// A user is signed in.
    ///
    /// 已登录。
    Authenticated { user: AuthUser },
    /// Nobody is signed in.
    ///
    /// 未登录。
    Unauthenticated,
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unresolved)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionState::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user().map(|u| &u.user_id)
    }
}

/// Events that drive the session gate.
///
/// 驱动会话门的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Auth provider delivered a new state.
    ///
    /// 认证提供方推送了新状态。
    AuthChanged(AuthStateChange),
    /// The navigation host landed on a different route.
    ///
    /// 导航宿主切换到了新路由。
    RouteChanged,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Navigate to the route, replacing history.
    ///
    /// 替换历史记录并跳转。
    ReplaceRoute(Route),
}

/// Pure session state machine.
///
/// 纯状态机：不包含副作用。
pub struct SessionStateMachine;

impl SessionStateMachine {
    pub fn transition(
        state: SessionState,
        event: SessionEvent,
        current_route: Route,
    ) -> (SessionState, Vec<SessionAction>) {
        let next = match event {
            SessionEvent::AuthChanged(AuthStateChange::SignedIn(user)) => {
                SessionState::Authenticated { user }
            }
            SessionEvent::AuthChanged(AuthStateChange::SignedOut) => SessionState::Unauthenticated,
            SessionEvent::RouteChanged => state,
        };

        let actions = Self::redirect_for(&next, current_route)
            .map(SessionAction::ReplaceRoute)
            .into_iter()
            .collect();

        (next, actions)
    }

    /// Route the gate must replace `current_route` with, if any.
    pub fn redirect_for(state: &SessionState, current_route: Route) -> Option<Route> {
        match (state, current_route.class()) {
            (SessionState::Unresolved, _) => None,
            (SessionState::Authenticated { .. }, RouteClass::Auth) => Some(Route::Home),
            (SessionState::Authenticated { .. }, RouteClass::Protected) => None,
            (SessionState::Unauthenticated, RouteClass::Protected) => Some(Route::Login),
            (SessionState::Unauthenticated, RouteClass::Auth) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            user_id: UserId::from("uid-1"),
            email: "ana@example.com".to_string(),
        }
    }

    fn signed_in() -> SessionEvent {
        SessionEvent::AuthChanged(AuthStateChange::SignedIn(user()))
    }

    fn signed_out() -> SessionEvent {
        SessionEvent::AuthChanged(AuthStateChange::SignedOut)
    }

    #[test]
    fn unresolved_never_redirects() {
        for route in Route::ALL {
            let (state, actions) =
                SessionStateMachine::transition(SessionState::Unresolved, SessionEvent::RouteChanged, route);
            assert_eq!(state, SessionState::Unresolved);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn sign_in_on_login_goes_home() {
        let (state, actions) =
            SessionStateMachine::transition(SessionState::Unresolved, signed_in(), Route::Login);
        assert_eq!(state, SessionState::Authenticated { user: user() });
        assert_eq!(actions, vec![SessionAction::ReplaceRoute(Route::Home)]);
    }

    #[test]
    fn sign_in_on_protected_route_stays() {
        let (_, actions) = SessionStateMachine::transition(
            SessionState::Unauthenticated,
            signed_in(),
            Route::Preferences,
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn sign_out_on_protected_route_goes_to_login() {
        let (state, actions) = SessionStateMachine::transition(
            SessionState::Authenticated { user: user() },
            signed_out(),
            Route::Settings,
        );
        assert_eq!(state, SessionState::Unauthenticated);
        assert_eq!(actions, vec![SessionAction::ReplaceRoute(Route::Login)]);
    }

    #[test]
    fn sign_out_on_register_stays() {
        let (_, actions) =
            SessionStateMachine::transition(SessionState::Unresolved, signed_out(), Route::Register);
        assert!(actions.is_empty());
    }

    #[test]
    fn route_change_keeps_state_and_reapplies_rule() {
        let state = SessionState::Authenticated { user: user() };
        let (next, actions) =
            SessionStateMachine::transition(state.clone(), SessionEvent::RouteChanged, Route::Register);
        assert_eq!(next, state);
        assert_eq!(actions, vec![SessionAction::ReplaceRoute(Route::Home)]);
    }

    #[test]
    fn every_resolved_outcome_lands_in_consistent_route_set() {
        let events = [signed_in(), signed_out()];
        for event in events {
            for route in Route::ALL {
                let (state, actions) =
                    SessionStateMachine::transition(SessionState::Unresolved, event.clone(), route);
                let landed = match actions.as_slice() {
                    [SessionAction::ReplaceRoute(target)] => *target,
                    [] => route,
                    other => panic!("unexpected actions: {other:?}"),
                };
                assert_eq!(state.is_authenticated(), !landed.is_auth_route());
            }
        }
    }
}
