//! Line-oriented driver standing in for the mobile screens.
//!
//! Each command calls the same use cases a screen would, then prints the
//! alerts it raised and where navigation ended up.

pub mod command;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use gameon_app::usecases::PreferencesScreen;
use gameon_app::App;
use gameon_core::matches::{MatchDraft, MatchFilter, MatchListing};
use gameon_core::ports::NavigationPort;
use gameon_core::{ColorScheme, Notice, Route, SessionState, ThemePreference};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::bootstrap::ShellAdapters;
pub use command::{parse_line, Command, CommandError, FindArgs, MatchCommand, PrefsCommand};

/// How long the shell waits for a background task to reflect a change.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W> {
    app: Arc<App>,
    adapters: ShellAdapters,
    out: W,
    prefs: Option<PreferencesScreen>,
    draft: Option<MatchDraft>,
}

impl<W: Write> Shell<W> {
    pub fn new(app: Arc<App>, adapters: ShellAdapters, out: W) -> Self {
        Self {
            app,
            adapters,
            out,
            prefs: None,
            draft: None,
        }
    }

    /// Reads commands until end of input or `quit`.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.wait_for_session(SessionState::is_resolved).await;
        self.print_status()?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if self.run_line(&line).await? == Flow::Quit {
                break;
            }
        }
        self.close_preferences();
        Ok(())
    }

    pub async fn run_line(&mut self, line: &str) -> Result<Flow> {
        match parse_line(line) {
            Ok(None) => Ok(Flow::Continue),
            Ok(Some(command)) => self.execute(command).await,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(command = ?command, "shell command");
        match command {
            Command::Help => writeln!(self.out, "{}", command::HELP)?,
            Command::Status => self.print_status()?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Login { email, password } => {
                let signed_in = self.app.sign_in().execute(&email, &password).await.is_ok();
                if signed_in {
                    self.wait_for_session(SessionState::is_authenticated).await;
                }
                self.print_alerts_and_route()?;
            }
            Command::Register {
                email,
                password,
                confirm,
            } => {
                let registered = self
                    .app
                    .sign_up()
                    .execute(&email, &password, &confirm)
                    .await
                    .is_ok();
                if registered {
                    self.wait_for_session(SessionState::is_authenticated).await;
                }
                self.print_alerts_and_route()?;
            }
            Command::Logout => {
                if self.app.sign_out().execute().await.is_ok() {
                    self.wait_for_session(|s| *s == SessionState::Unauthenticated)
                        .await;
                    self.close_preferences();
                    self.draft = None;
                }
                self.print_alerts_and_route()?;
            }
            Command::Go(Route::Preferences) => self.open_preferences().await?,
            Command::Go(route) => {
                self.close_preferences();
                self.navigate(|nav| nav.push(route));
                self.print_alerts_and_route()?;
            }
            Command::Back => {
                self.close_preferences();
                self.navigate(|nav| {
                    nav.back();
                });
                self.print_alerts_and_route()?;
            }
            Command::Home => self.print_home().await?,
            Command::Prefs(prefs) => self.preferences(prefs).await?,
            Command::Theme(preference) => self.set_theme(preference).await?,
            Command::Os(scheme) => self.set_os_scheme(scheme).await?,
            Command::Match(cmd) => self.create_match(cmd).await?,
            Command::Find(args) => self.find_matches(args).await?,
        }
        Ok(Flow::Continue)
    }

    fn navigate(&self, f: impl FnOnce(&dyn NavigationPort)) {
        f(self.app.deps().navigation.as_ref());
        self.app.session().handle_route_change();
    }

    fn current_route(&self) -> Route {
        self.app.deps().navigation.current_route()
    }

    async fn wait_for_session(&self, mut pred: impl FnMut(&SessionState) -> bool) {
        let mut rx = self.app.session().subscribe();
        let reached = tokio::time::timeout(SETTLE_TIMEOUT, rx.wait_for(|s| pred(s)))
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false);
        if !reached {
            warn!("session state did not settle in time");
        }
    }

    async fn print_home(&mut self) -> Result<()> {
        let user_id = self.app.session().current_user_id();
        let summary = self.app.home_summary().execute(user_id.as_ref()).await;
        writeln!(self.out, "Skill Level: {}", summary.skill_level)?;
        writeln!(self.out, "Preferred Location: {}", summary.preferred_location)?;
        self.print_alerts()
    }

    async fn open_preferences(&mut self) -> Result<()> {
        if self.prefs.is_none() {
            if self.current_route() != Route::Preferences {
                self.navigate(|nav| nav.push(Route::Preferences));
            }
            if self.current_route() == Route::Preferences {
                let screen = self.app.preferences_screen();
                screen.mount().await;
                if self.current_route() == Route::Preferences {
                    self.prefs = Some(screen);
                } else {
                    screen.unmount();
                }
            }
        }
        if self.prefs.is_some() {
            self.print_preferences()?;
        }
        self.print_alerts_and_route()
    }

    fn close_preferences(&mut self) {
        if let Some(screen) = self.prefs.take() {
            screen.unmount();
        }
    }

    async fn preferences(&mut self, command: PrefsCommand) -> Result<()> {
        if command == PrefsCommand::Open {
            return self.open_preferences().await;
        }
        let Some(screen) = self.prefs.as_ref() else {
            writeln!(self.out, "preferences screen is not open (prefs open)")?;
            return Ok(());
        };

        match command {
            PrefsCommand::Open => {}
            PrefsCommand::Show => {}
            PrefsCommand::Skill(level) => screen.select_skill_level(level),
            PrefsCommand::Place(label) => screen.select_place(label, None),
            PrefsCommand::Locate => screen.use_current_location().await,
            PrefsCommand::Save => {
                if screen.save().await {
                    self.close_preferences();
                    self.app.session().handle_route_change();
                }
            }
            PrefsCommand::Close => {
                self.close_preferences();
                self.navigate(|nav| {
                    nav.back();
                });
            }
        }

        if self.prefs.is_some() {
            self.print_preferences()?;
        }
        self.print_alerts_and_route()
    }

    fn print_preferences(&mut self) -> Result<()> {
        let Some(screen) = self.prefs.as_ref() else {
            return Ok(());
        };
        let view = screen.view();
        let coords = view
            .draft
            .location_coords
            .map(|c| format!(" ({:.4}, {:.4})", c.latitude, c.longitude))
            .unwrap_or_default();
        writeln!(self.out, "Skill Level: {}", view.draft.skill_level.label())?;
        writeln!(
            self.out,
            "Preferred Location: {}{coords}",
            view.draft.preferred_location
        )?;
        if view.has_unsaved_changes() {
            writeln!(self.out, "(unsaved changes)")?;
        }
        Ok(())
    }

    async fn set_theme(&mut self, preference: ThemePreference) -> Result<()> {
        let persisted = self.app.theme().set_preference(preference);
        if let Err(err) = persisted.await {
            warn!(error = %err, "theme persistence task failed");
        }
        self.print_theme()
    }

    async fn set_os_scheme(&mut self, scheme: Option<ColorScheme>) -> Result<()> {
        let mut themes = self.app.theme().subscribe();
        self.adapters.appearance.set_scheme(scheme);
        let settled = tokio::time::timeout(SETTLE_TIMEOUT, themes.wait_for(|t| t.os_scheme == scheme))
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false);
        if !settled {
            warn!("theme did not follow the os appearance in time");
        }
        self.print_theme()
    }

    async fn create_match(&mut self, command: MatchCommand) -> Result<()> {
        if command == MatchCommand::New {
            self.close_preferences();
            self.navigate(|nav| nav.push(Route::CreateMatch));
            if self.current_route() == Route::CreateMatch {
                self.draft = Some(MatchDraft::new(self.app.deps().clock.now_local()));
                self.print_draft()?;
            }
            return self.print_alerts_and_route();
        }
        let Some(draft) = self.draft.as_mut() else {
            writeln!(self.out, "no match draft (match new)")?;
            return Ok(());
        };

        match command {
            MatchCommand::New | MatchCommand::Show => {}
            MatchCommand::Date(date) => draft.set_date(date),
            MatchCommand::Start(time) => draft.set_start_time(time),
            MatchCommand::End(time) => {
                if let Err(err) = draft.set_end_time(time) {
                    self.app
                        .deps()
                        .notices
                        .alert(Notice::new(err.title(), err.to_string()));
                }
            }
            MatchCommand::Place(label) => {
                draft.location = label;
                draft.location_coords = None;
            }
            MatchCommand::Skill(level) => draft.skill_level = level,
            MatchCommand::Players(n) => draft.set_players_needed(n),
            MatchCommand::Court(court) => draft.court_type = court,
            MatchCommand::Notes(notes) => draft.notes = notes,
            MatchCommand::Submit => {
                let Some(user_id) = self.app.session().current_user_id() else {
                    writeln!(self.out, "not signed in")?;
                    return Ok(());
                };
                let draft = draft.clone();
                if let Ok(listing) = self.app.create_match().execute(&user_id, draft).await {
                    let id = listing.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                    writeln!(self.out, "Match created: {id}")?;
                    self.draft = None;
                    self.navigate(|nav| {
                        nav.back();
                    });
                    return self.print_alerts_and_route();
                }
            }
        }

        self.print_draft()?;
        self.print_alerts()
    }

    fn print_draft(&mut self) -> Result<()> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(());
        };
        let location = if draft.location.is_empty() {
            "(none)"
        } else {
            draft.location.as_str()
        };
        writeln!(
            self.out,
            "Date: {}  {} - {}",
            draft.starts_at.format("%Y-%m-%d"),
            draft.starts_at.format("%H:%M"),
            draft.ends_at.format("%H:%M"),
        )?;
        writeln!(self.out, "Location: {location}")?;
        writeln!(
            self.out,
            "Skill Level: {}  Players Needed: {}  Court: {}",
            draft.skill_level.label(),
            draft.players_needed(),
            draft.court_type
        )?;
        if !draft.notes.is_empty() {
            writeln!(self.out, "Notes: {}", draft.notes)?;
        }
        Ok(())
    }

    async fn find_matches(&mut self, args: FindArgs) -> Result<()> {
        let filter = MatchFilter {
            date: args.date,
            location: args.location,
            skill_level: args.skill_level,
            time_slot: args.time_slot,
        };
        writeln!(self.out, "{}", filter.describe())?;

        match self.app.find_matches().execute(&filter).await {
            Ok(listings) if listings.is_empty() => writeln!(self.out, "No matches found")?,
            Ok(listings) => {
                for listing in &listings {
                    writeln!(self.out, "{}", format_listing(listing))?;
                }
            }
            Err(err) => writeln!(self.out, "search failed: {err:#}")?,
        }
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        let session = match self.app.session().state() {
            SessionState::Unresolved => "resolving".to_string(),
            SessionState::Unauthenticated => "signed out".to_string(),
            SessionState::Authenticated { user } => format!("signed in as {}", user.email),
        };
        writeln!(self.out, "Session: {session}")?;
        self.print_route()?;
        self.print_theme()
    }

    fn print_theme(&mut self) -> Result<()> {
        let theme = self.app.theme().snapshot();
        let os = theme.os_scheme.map(|s| s.as_str()).unwrap_or("unknown");
        writeln!(
            self.out,
            "Theme: {} (effective {}, os {os})",
            theme.preference, theme.effective
        )?;
        Ok(())
    }

    fn print_route(&mut self) -> Result<()> {
        let route = self.current_route();
        writeln!(self.out, "Route: {route}")?;
        Ok(())
    }

    fn print_alerts(&mut self) -> Result<()> {
        for notice in self.adapters.notices.take_pending() {
            writeln!(self.out, "[{}] {}", notice.title, notice.message)?;
        }
        Ok(())
    }

    fn print_alerts_and_route(&mut self) -> Result<()> {
        self.print_alerts()?;
        self.print_route()
    }
}

fn format_listing(listing: &MatchListing) -> String {
    format!(
        "{} {} - {}  {}  {}  {} needed  {}",
        listing.start_time.format("%Y-%m-%d"),
        listing.start_time.format("%H:%M"),
        listing.end_time.format("%H:%M"),
        listing.location,
        listing.skill_level.label(),
        listing.players_needed,
        listing.court_type,
    )
}
