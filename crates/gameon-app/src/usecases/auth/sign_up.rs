use std::sync::Arc;

use gameon_core::ports::{AuthError, AuthPort, UserNoticePort};
use gameon_core::{AuthUser, Notice};
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Account registration with password confirmation.
///
/// A mismatched confirmation is rejected before the provider is called.
/// A successful registration also signs the user in.
pub struct SignUp {
    auth: Arc<dyn AuthPort>,
    notices: Arc<dyn UserNoticePort>,
}

impl SignUp {
    pub fn new(auth: Arc<dyn AuthPort>, notices: Arc<dyn UserNoticePort>) -> Self {
        Self { auth, notices }
    }

    pub async fn execute(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AuthUser, RegistrationError> {
        let span = info_span!("usecase.sign_up.execute");

        async {
            if password != confirm_password {
                info!("password confirmation mismatch");
                self.notices.alert(Notice::new(
                    "Registration Failed",
                    RegistrationError::PasswordMismatch.to_string(),
                ));
                return Err(RegistrationError::PasswordMismatch);
            }

            match self.auth.sign_up(email.trim(), password).await {
                Ok(user) => {
                    info!(user_id = %user.user_id, "registered");
                    self.notices.alert(Notice::new(
                        "Registration Successful",
                        "You have successfully registered and logged in!",
                    ));
                    Ok(user)
                }
                Err(err) => {
                    warn!(error = ?err, "registration failed");
                    self.notices
                        .alert(Notice::new("Registration Failed", err.to_string()));
                    Err(err.into())
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{MockAuth, MockNotices};
    use gameon_core::UserId;

    #[tokio::test]
    async fn mismatch_short_circuits() {
        let mut auth = MockAuth::new();
        auth.expect_sign_up().never();
        let mut notices = MockNotices::new();
        notices
            .expect_alert()
            .withf(|n| n.title == "Registration Failed" && n.message == "Passwords do not match!")
            .times(1)
            .return_const(());

        let err = SignUp::new(Arc::new(auth), Arc::new(notices))
            .execute("sam@example.com", "secret1", "secret2")
            .await
            .unwrap_err();

        assert_eq!(err, RegistrationError::PasswordMismatch);
    }

    #[tokio::test]
    async fn success_alerts() {
        let mut auth = MockAuth::new();
        auth.expect_sign_up().times(1).returning(|email, _| {
            Ok(AuthUser {
                user_id: UserId::from("u2"),
                email: email.to_string(),
            })
        });
        let mut notices = MockNotices::new();
        notices
            .expect_alert()
            .withf(|n| n.title == "Registration Successful")
            .times(1)
            .return_const(());

        let user = SignUp::new(Arc::new(auth), Arc::new(notices))
            .execute("new@example.com", "secret1", "secret1")
            .await
            .unwrap();

        assert_eq!(user.user_id, UserId::from("u2"));
    }

    #[tokio::test]
    async fn provider_rejection_is_surfaced() {
        let mut auth = MockAuth::new();
        auth.expect_sign_up()
            .returning(|_, _| Err(AuthError::WeakPassword { min_len: 6 }));
        let mut notices = MockNotices::new();
        notices
            .expect_alert()
            .withf(|n| n.message == "Password should be at least 6 characters.")
            .times(1)
            .return_const(());

        let err = SignUp::new(Arc::new(auth), Arc::new(notices))
            .execute("new@example.com", "abc", "abc")
            .await
            .unwrap_err();

        assert_eq!(err, RegistrationError::Auth(AuthError::WeakPassword { min_len: 6 }));
    }
}
