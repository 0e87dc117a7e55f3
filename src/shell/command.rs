//! Line parser for the interactive shell.

use chrono::{NaiveDate, NaiveTime};
use gameon_core::matches::{CourtType, TimeSlot};
use gameon_core::{ColorScheme, Route, SkillLevel, ThemePreference};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Status,
    Quit,
    Login { email: String, password: String },
    Register { email: String, password: String, confirm: String },
    Logout,
    Go(Route),
    Back,
    Home,
    Prefs(PrefsCommand),
    Theme(ThemePreference),
    Os(Option<ColorScheme>),
    Match(MatchCommand),
    Find(FindArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrefsCommand {
    Open,
    Show,
    Skill(SkillLevel),
    Place(String),
    Locate,
    Save,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchCommand {
    New,
    Show,
    Date(NaiveDate),
    Start(NaiveTime),
    End(NaiveTime),
    Place(String),
    Skill(SkillLevel),
    Players(u8),
    Court(CourtType),
    Notes(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindArgs {
    pub date: NaiveDate,
    pub skill_level: Option<SkillLevel>,
    pub time_slot: Option<TimeSlot>,
    pub location: Option<String>,
}

pub const HELP: &str = "\
commands:
  status                              current route, session and theme
  login <email> <password>
  register <email> <password> <confirm>
  logout
  go <route> | back                   navigate (home, preferences, create-match, ...)
  home                                preference summary
  prefs open|show|locate|save|close
  prefs skill <beginner|intermediate|advanced>
  prefs place <label>
  theme <light|dark|system>
  os <light|dark|none>                simulate the OS appearance
  match new|show|submit
  match date <YYYY-MM-DD> | start <HH:MM> | end <HH:MM>
  match place <label> | skill <level> | players <n> | court <indoor|outdoor> | notes <text>
  find <YYYY-MM-DD> [skill=<level>] [slot=<morning|afternoon|evening|late-night>] [at=<text>]
  quit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match word {
        "help" | "?" => Command::Help,
        "status" => Command::Status,
        "quit" | "exit" => Command::Quit,
        "login" => {
            let [email, password] = args::<2>(rest, "login <email> <password>")?;
            Command::Login { email, password }
        }
        "register" => {
            let [email, password, confirm] =
                args::<3>(rest, "register <email> <password> <confirm>")?;
            Command::Register {
                email,
                password,
                confirm,
            }
        }
        "logout" => Command::Logout,
        "go" => {
            let [route] = args::<1>(rest, "go <route>")?;
            Command::Go(parse_value(&route)?)
        }
        "back" => Command::Back,
        "home" => Command::Home,
        "prefs" => Command::Prefs(parse_prefs(rest)?),
        "theme" => {
            let [value] = args::<1>(rest, "theme <light|dark|system>")?;
            Command::Theme(parse_value(&value)?)
        }
        "os" => {
            let [value] = args::<1>(rest, "os <light|dark|none>")?;
            let scheme = match value.as_str() {
                "none" | "unknown" => None,
                other => Some(parse_value(other)?),
            };
            Command::Os(scheme)
        }
        "match" => Command::Match(parse_match(rest)?),
        "find" => Command::Find(parse_find(rest)?),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_prefs(rest: &str) -> Result<PrefsCommand, CommandError> {
    const USAGE: &str = "prefs open|show|skill <level>|place <label>|locate|save|close";
    let (sub, rest) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
    let command = match sub {
        "open" => PrefsCommand::Open,
        "show" => PrefsCommand::Show,
        "skill" => {
            let [level] = args::<1>(rest, "prefs skill <beginner|intermediate|advanced>")?;
            PrefsCommand::Skill(parse_value(&level)?)
        }
        "place" => PrefsCommand::Place(rest.to_string()),
        "locate" => PrefsCommand::Locate,
        "save" => PrefsCommand::Save,
        "close" => PrefsCommand::Close,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(command)
}

fn parse_match(rest: &str) -> Result<MatchCommand, CommandError> {
    const USAGE: &str =
        "match new|show|submit|date|start|end|place|skill|players|court|notes <value>";
    let (sub, rest) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
    let command = match sub {
        "new" => MatchCommand::New,
        "show" => MatchCommand::Show,
        "submit" => MatchCommand::Submit,
        "date" => MatchCommand::Date(parse_date(rest)?),
        "start" => MatchCommand::Start(parse_time(rest)?),
        "end" => MatchCommand::End(parse_time(rest)?),
        "place" => MatchCommand::Place(rest.to_string()),
        "skill" => MatchCommand::Skill(parse_value(rest)?),
        "players" => MatchCommand::Players(
            rest.parse()
                .map_err(|_| CommandError::InvalidArgument(format!("not a number: {rest}")))?,
        ),
        "court" => MatchCommand::Court(parse_value(rest)?),
        "notes" => MatchCommand::Notes(rest.to_string()),
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(command)
}

fn parse_find(rest: &str) -> Result<FindArgs, CommandError> {
    const USAGE: &str = "find <YYYY-MM-DD> [skill=<level>] [slot=<slot>] [at=<text>]";
    let (date, rest) = split_word(rest).ok_or(CommandError::Usage(USAGE))?;
    let mut args = FindArgs {
        date: parse_date(date)?,
        skill_level: None,
        time_slot: None,
        location: None,
    };

    let mut rest = rest;
    while let Some((token, tail)) = split_word(rest) {
        let (key, value) = token.split_once('=').ok_or(CommandError::Usage(USAGE))?;
        match key {
            "skill" => args.skill_level = Some(parse_value(value)?),
            "slot" => args.time_slot = Some(parse_value(value)?),
            "at" => args.location = Some(value.to_string()),
            _ => return Err(CommandError::Usage(USAGE)),
        }
        rest = tail;
    }
    Ok(args)
}

fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((s, "")),
    }
}

fn args<const N: usize>(rest: &str, usage: &'static str) -> Result<[String; N], CommandError> {
    let words: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    words.try_into().map_err(|_| CommandError::Usage(usage))
}

fn parse_value<T>(s: &str) -> Result<T, CommandError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    s.trim()
        .parse()
        .map_err(|e: T::Err| CommandError::InvalidArgument(e.to_string()))
}

fn parse_date(s: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CommandError::InvalidArgument(format!("expected YYYY-MM-DD, got {s:?}")))
}

fn parse_time(s: &str) -> Result<NaiveTime, CommandError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| CommandError::InvalidArgument(format!("expected HH:MM, got {s:?}")))
}
