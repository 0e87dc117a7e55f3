use std::sync::Arc;

use gameon_core::ports::{AuthError, AuthPort, UserNoticePort};
use gameon_core::{AuthUser, Notice};
use tracing::{info, info_span, warn, Instrument};

/// Email/password sign in.
///
/// Navigation is left to the session gate, which reacts to the auth event
/// the provider emits.
pub struct SignIn {
    auth: Arc<dyn AuthPort>,
    notices: Arc<dyn UserNoticePort>,
}

impl SignIn {
    pub fn new(auth: Arc<dyn AuthPort>, notices: Arc<dyn UserNoticePort>) -> Self {
        Self { auth, notices }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let span = info_span!("usecase.sign_in.execute");

        async {
            match self.auth.sign_in(email.trim(), password).await {
                Ok(user) => {
                    info!(user_id = %user.user_id, "signed in");
                    self.notices.alert(Notice::new(
                        "Login Successful",
                        "You have successfully logged in!",
                    ));
                    Ok(user)
                }
                Err(err) => {
                    warn!(error = ?err, "sign in failed");
                    self.notices
                        .alert(Notice::new("Login Failed", err.to_string()));
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
