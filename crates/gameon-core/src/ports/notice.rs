use crate::notice::Notice;

/// Shows modal alerts for user-initiated actions.
pub trait UserNoticePort: Send + Sync {
    fn alert(&self, notice: Notice);
}
