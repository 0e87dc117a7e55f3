//! Authenticated user facts delivered by the auth provider.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
}

/// One entry of the auth provider's state stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStateChange {
    SignedIn(AuthUser),
    SignedOut,
}

impl AuthStateChange {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthStateChange::SignedIn(user) => Some(user),
            AuthStateChange::SignedOut => None,
        }
    }
}

impl From<Option<AuthUser>> for AuthStateChange {
    fn from(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => AuthStateChange::SignedIn(user),
            None => AuthStateChange::SignedOut,
        }
    }
}
