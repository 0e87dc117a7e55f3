use chrono::{DateTime, Local, NaiveDateTime, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Local wall-clock time, used for match scheduling.
    fn now_local(&self) -> NaiveDateTime {
        self.now().with_timezone(&Local).naive_local()
    }
}
