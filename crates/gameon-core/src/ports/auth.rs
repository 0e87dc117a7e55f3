//! Auth provider port.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::auth::{AuthStateChange, AuthUser};
use crate::ports::errors::AuthError;

/// Auth provider: sign-in flows plus an ordered auth-state stream.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Subscribes to auth state changes.
    ///
    /// The current state is delivered first, then every change in the order
    /// the provider emits it. Dropping the returned subscription unsubscribes;
    /// providers prune subscribers whose receiving side is gone.
    fn subscribe(&self) -> AuthSubscription;

    fn current_user(&self) -> Option<AuthUser>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Receiving half of an auth-state stream.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: mpsc::UnboundedReceiver<AuthStateChange>,
}

/// Provider-side half of an auth-state stream.
#[derive(Debug, Clone)]
pub struct AuthEventSender {
    tx: mpsc::UnboundedSender<AuthStateChange>,
}

impl AuthSubscription {
    pub fn channel() -> (AuthEventSender, AuthSubscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AuthEventSender { tx }, AuthSubscription { rx })
    }

    /// Next auth state, or `None` once the provider has gone away.
    pub async fn next(&mut self) -> Option<AuthStateChange> {
        self.rx.recv().await
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl AuthEventSender {
    /// Returns `false` when the subscriber is gone.
    pub fn send(&self, change: AuthStateChange) -> bool {
        self.tx.send(change).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;

    #[tokio::test]
    async fn events_arrive_in_send_order() {
        let (tx, mut sub) = AuthSubscription::channel();
        let user = AuthUser {
            user_id: UserId::from("uid-1"),
            email: "a@b.co".into(),
        };

        assert!(tx.send(AuthStateChange::SignedOut));
        assert!(tx.send(AuthStateChange::SignedIn(user.clone())));
        drop(tx);

        assert_eq!(sub.next().await, Some(AuthStateChange::SignedOut));
        assert_eq!(sub.next().await, Some(AuthStateChange::SignedIn(user)));
        assert_eq!(sub.next().await, None);
    }

    #[test]
    fn dropped_subscription_closes_sender() {
        let (tx, sub) = AuthSubscription::channel();
        sub.unsubscribe();
        assert!(tx.is_closed());
        assert!(!tx.send(AuthStateChange::SignedOut));
    }
}
