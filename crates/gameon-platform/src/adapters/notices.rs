use std::sync::{Mutex, PoisonError};

use gameon_core::ports::UserNoticePort;
use gameon_core::Notice;
use tracing::info;

/// Queues alerts until the console shell displays them.
#[derive(Default)]
pub struct ConsoleNotices {
    pending: Mutex<Vec<Notice>>,
}

impl ConsoleNotices {
    /// Returns and clears alerts raised since the last call.
    pub fn take_pending(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl UserNoticePort for ConsoleNotices {
    fn alert(&self, notice: Notice) {
        info!(title = %notice.title, message = %notice.message, "alert");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_alerts_are_drained() {
        let notices = ConsoleNotices::default();
        notices.alert(Notice::new("Success", "Preferences saved successfully"));

        assert_eq!(notices.take_pending().len(), 1);
        assert!(notices.take_pending().is_empty());
    }
}
