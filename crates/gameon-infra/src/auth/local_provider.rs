//! File-backed email/password auth provider.
//! 基于文件的邮箱/密码认证提供方。

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gameon_core::ports::{AuthError, AuthEventSender, AuthPort, AuthSubscription};
use gameon_core::{AuthStateChange, AuthUser, UserId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

use super::password::{hash_password, verify_password, PasswordHash};
use crate::fs::{atomic_write, read_to_string_opt};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    user_id: UserId,
    email: String,
    salt: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Account {
    fn auth_user(&self) -> AuthUser {
        AuthUser {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }

    fn password(&self) -> PasswordHash {
        PasswordHash {
            salt: self.salt.clone(),
            hash: self.password_hash.clone(),
        }
    }
}

/// On-disk state: registered accounts plus the persisted session.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountBook {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    session: Option<UserId>,
}

impl AccountBook {
    fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    fn find_by_id(&self, user_id: &UserId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.user_id == user_id)
    }
}

/// Signed-in user plus the subscribers told about it.
///
/// Both live under one lock: a subscriber registers against the same state
/// every later change is emitted from.
#[derive(Default)]
struct Broadcast {
    current: Option<AuthUser>,
    subscribers: Vec<AuthEventSender>,
}

/// Auth provider storing accounts in a local JSON file.
///
/// The signed-in session survives restarts. Every subscriber first receives
/// the current state, then each change in order.
pub struct LocalAuthProvider {
    path: PathBuf,
    book: tokio::sync::Mutex<AccountBook>,
    broadcast: Mutex<Broadcast>,
}

impl LocalAuthProvider {
    /// Opens (or starts) the account file at `path` and restores its session.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let book = match read_to_string_opt(&path).await? {
            Some(content) => serde_json::from_str::<AccountBook>(&content)
                .with_context(|| format!("parse accounts failed: {}", path.display()))?,
            None => AccountBook::default(),
        };

        let current = book
            .session
            .as_ref()
            .and_then(|id| book.find_by_id(id))
            .map(Account::auth_user);
        if let Some(user) = &current {
            info!(user_id = %user.user_id, "restored signed-in session");
        }

        Ok(Self {
            path,
            book: tokio::sync::Mutex::new(book),
            broadcast: Mutex::new(Broadcast {
                current,
                subscribers: Vec::new(),
            }),
        })
    }

    async fn persist(&self, book: &AccountBook) -> Result<(), AuthError> {
        let write = async {
            let content =
                serde_json::to_string_pretty(book).context("serialize accounts failed")?;
            atomic_write(&self.path, &content).await
        };
        write
            .await
            .map_err(|e| AuthError::Backend(format!("{e:#}")))
    }

    fn set_current(&self, user: Option<AuthUser>) {
        let mut broadcast = lock(&self.broadcast);
        broadcast.current = user.clone();

        let change = AuthStateChange::from(user);
        broadcast.subscribers.retain(|tx| tx.send(change.clone()));
        debug!(
            subscribers = broadcast.subscribers.len(),
            "auth state emitted"
        );
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[async_trait]
impl AuthPort for LocalAuthProvider {
    fn subscribe(&self) -> AuthSubscription {
        let (tx, subscription) = AuthSubscription::channel();
        let mut broadcast = lock(&self.broadcast);
        tx.send(AuthStateChange::from(broadcast.current.clone()));

        broadcast.subscribers.retain(|s| !s.is_closed());
        broadcast.subscribers.push(tx);
        subscription
    }

    fn current_user(&self) -> Option<AuthUser> {
        lock(&self.broadcast).current.clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let span = info_span!("infra.local_auth.sign_in");

        async {
            let email = normalize_email(email);
            let mut book = self.book.lock().await;

            let account = book
                .find_by_email(&email)
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?;
            let matches = verify_password(password, &account.password())
                .map_err(|e| AuthError::Backend(format!("{e:#}")))?;
            if !matches {
                return Err(AuthError::InvalidCredentials);
            }

            book.session = Some(account.user_id.clone());
            self.persist(&book).await?;
            drop(book);

            let user = account.auth_user();
            info!(user_id = %user.user_id, "signed in");
            self.set_current(Some(user.clone()));
            Ok(user)
        }
        .instrument(span)
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let span = info_span!("infra.local_auth.sign_up");

        async {
            let email = normalize_email(email);
            if !is_valid_email(&email) {
                return Err(AuthError::InvalidEmail);
            }
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthError::WeakPassword {
                    min_len: MIN_PASSWORD_LEN,
                });
            }

            let mut book = self.book.lock().await;
            if book.find_by_email(&email).is_some() {
                return Err(AuthError::EmailAlreadyInUse);
            }

            let hashed = hash_password(password).map_err(|e| AuthError::Backend(format!("{e:#}")))?;
            let account = Account {
                user_id: UserId::generate(),
                email,
                salt: hashed.salt,
                password_hash: hashed.hash,
                created_at: Utc::now(),
            };
            let user = account.auth_user();

            book.accounts.push(account);
            book.session = Some(user.user_id.clone());
            if let Err(err) = self.persist(&book).await {
                book.accounts.pop();
                book.session = None;
                return Err(err);
            }
            drop(book);

            info!(user_id = %user.user_id, "account registered");
            self.set_current(Some(user.clone()));
            Ok(user)
        }
        .instrument(span)
        .await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut book = self.book.lock().await;
        if book.session.is_none() && self.current_user().is_none() {
            return Ok(());
        }

        book.session = None;
        self.persist(&book).await?;
        drop(book);

        info!("signed out");
        self.set_current(None);
        Ok(())
    }
}
