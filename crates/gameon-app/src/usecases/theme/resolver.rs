//! Theme resolver: user override vs. live OS appearance.
//! 主题解析器：用户选择与系统外观。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gameon_core::ports::KeyValuePort;
use gameon_core::theme::THEME_PREFERENCE_KEY;
use gameon_core::{ColorScheme, ThemePreference, ThemeSnapshot};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

/// Holds the theme preference and the effective color scheme.
///
/// Constructed once at startup and shared by `Arc`. Readers take a
/// [`ThemeSnapshot`] or subscribe to changes; the only writers are
/// [`ThemeResolver::set_preference`] and [`ThemeResolver::on_os_scheme_changed`].
pub struct ThemeResolver {
    kv: Arc<dyn KeyValuePort>,
    state: watch::Sender<ThemeSnapshot>,
    /// Bumped by every `set_preference`; lets `init` detect a user choice
    /// made while the stored value was still loading.
    generation: AtomicU64,
    /// Serializes writes so the stored value ends up as the latest preference.
    persist_lock: Arc<Mutex<()>>,
}

impl ThemeResolver {
    pub fn new(kv: Arc<dyn KeyValuePort>, initial_os_scheme: Option<ColorScheme>) -> Self {
        let (state, _) = watch::channel(ThemeSnapshot::new(
            ThemePreference::System,
            initial_os_scheme,
        ));
        Self {
            kv,
            state,
            generation: AtomicU64::new(0),
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the persisted preference.
    ///
    /// Missing or unrecognized values keep `system`; read failures are
    /// logged. A value that arrives after the user already picked a
    /// preference is discarded.
    pub async fn init(&self) -> ThemeSnapshot {
        let span = info_span!("usecase.theme.init");

        async {
            let started_at = self.generation.load(Ordering::SeqCst);

            let loaded = match self.kv.get_item(THEME_PREFERENCE_KEY).await {
                Ok(Some(raw)) => match raw.parse::<ThemePreference>() {
                    Ok(preference) => Some(preference),
                    Err(err) => {
                        warn!(error = %err, "ignoring stored theme preference");
                        None
                    }
                },
                Ok(None) => {
                    debug!("no stored theme preference");
                    None
                }
                Err(err) => {
                    warn!(error = %err, "failed to read theme preference");
                    None
                }
            };

            if let Some(preference) = loaded {
                if self.generation.load(Ordering::SeqCst) == started_at {
                    self.apply_preference(preference);
                    info!(preference = %preference, "theme preference restored");
                } else {
                    debug!(
                        preference = %preference,
                        "stored theme preference superseded by user choice"
                    );
                }
            }

            self.snapshot()
        }
        .instrument(span)
        .await
    }

    /// Applies `preference` immediately and persists it in the background.
    ///
    /// The returned handle resolves once the write attempt finished. A failed
    /// write is logged and the in-memory value stays.
    pub fn set_preference(&self, preference: ThemePreference) -> JoinHandle<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.apply_preference(preference);
        info!(preference = %preference, "theme preference changed");

        let kv = self.kv.clone();
        let state = self.state.subscribe();
        let persist_lock = self.persist_lock.clone();
        tokio::spawn(
            async move {
                let _guard = persist_lock.lock().await;
                let latest = state.borrow().preference;
                if let Err(err) = kv.set_item(THEME_PREFERENCE_KEY, latest.as_str()).await {
                    warn!(error = %err, preference = %latest, "failed to persist theme preference");
                }
            }
            .instrument(info_span!("usecase.theme.persist")),
        )
    }

    /// Recomputes the effective scheme for a new OS appearance.
    pub fn on_os_scheme_changed(&self, os_scheme: Option<ColorScheme>) -> ThemeSnapshot {
        self.state.send_modify(|snapshot| {
            *snapshot = ThemeSnapshot::new(snapshot.preference, os_scheme);
        });
        let snapshot = self.snapshot();
        debug!(os_scheme = ?os_scheme, effective = %snapshot.effective, "os appearance changed");
        snapshot
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        *self.state.borrow()
    }

    pub fn preference(&self) -> ThemePreference {
        self.snapshot().preference
    }

    pub fn effective_scheme(&self) -> ColorScheme {
        self.snapshot().effective
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.state.subscribe()
    }

    /// Follows an OS appearance feed until it closes or `shutdown` fires.
    pub async fn run_os_listener(
        &self,
        mut os_scheme: watch::Receiver<Option<ColorScheme>>,
        shutdown: CancellationToken,
    ) {
        async {
            let current = *os_scheme.borrow_and_update();
            self.on_os_scheme_changed(current);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    changed = os_scheme.changed() => {
                        if changed.is_err() {
                            debug!("os appearance feed closed");
                            break;
                        }
                        let scheme = *os_scheme.borrow_and_update();
                        self.on_os_scheme_changed(scheme);
                    }
                }
            }
        }
        .instrument(info_span!("usecase.theme.os_listener"))
        .await
    }

    fn apply_preference(&self, preference: ThemePreference) {
        self.state.send_modify(|snapshot| {
            *snapshot = ThemeSnapshot::new(preference, snapshot.os_scheme);
        });
    }
}
