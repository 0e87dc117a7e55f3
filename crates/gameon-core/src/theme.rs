//! Theme preference and color scheme resolution.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Local key the theme preference is persisted under.
pub const THEME_PREFERENCE_KEY: &str = "themePreference";

/// The user's theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// A concrete light/dark scheme applied to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Effective scheme for this preference given the live OS scheme.
    ///
    /// An OS that reports no scheme is treated as light.
    pub fn resolve(self, os_scheme: Option<ColorScheme>) -> ColorScheme {
        match self {
            ThemePreference::Light => ColorScheme::Light,
            ThemePreference::Dark => ColorScheme::Dark,
            ThemePreference::System => os_scheme.unwrap_or_default(),
        }
    }
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl Display for ThemePreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme value: {0}")]
pub struct UnknownThemeValue(pub String);

impl FromStr for ThemePreference {
    type Err = UnknownThemeValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(UnknownThemeValue(other.to_string())),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = UnknownThemeValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(UnknownThemeValue(other.to_string())),
        }
    }
}

/// Consistent view of the theme state handed to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeSnapshot {
    pub preference: ThemePreference,
    pub os_scheme: Option<ColorScheme>,
    pub effective: ColorScheme,
}

impl ThemeSnapshot {
    pub fn new(preference: ThemePreference, os_scheme: Option<ColorScheme>) -> Self {
        Self {
            preference,
            os_scheme,
            effective: preference.resolve(os_scheme),
        }
    }
}
