use std::sync::Arc;

use gameon_core::ports::{AuthError, AuthPort, UserNoticePort};
use gameon_core::Notice;
use tracing::{info, info_span, warn, Instrument};

pub struct SignOut {
    auth: Arc<dyn AuthPort>,
    notices: Arc<dyn UserNoticePort>,
}

impl SignOut {
    pub fn new(auth: Arc<dyn AuthPort>, notices: Arc<dyn UserNoticePort>) -> Self {
        Self { auth, notices }
    }

    pub async fn execute(&self) -> Result<(), AuthError> {
        async {
            self.auth.sign_out().await.inspect_err(|err| {
                warn!(error = ?err, "sign out failed");
                self.notices.alert(Notice::new(
                    "Logout Error",
                    "Failed to log out. Please try again.",
                ));
            })?;
            info!("signed out");
            Ok(())
        }
        .instrument(info_span!("usecase.sign_out.execute"))
        .await
    }
}
