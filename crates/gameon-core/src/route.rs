//! Screen routes and their classification.
//!
//! Auth-route detection goes through [`Route::class`] instead of comparing
//! path strings at the call sites.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every screen the navigation host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Login,
    Register,
    Preferences,
    CreateMatch,
    FindMatches,
    Matches,
    Messages,
    Settings,
}

/// Which route set a screen belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable only while signed out (login / register).
    Auth,
    /// Reachable only while signed in.
    Protected,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Preferences,
        Route::CreateMatch,
        Route::FindMatches,
        Route::Matches,
        Route::Messages,
        Route::Settings,
    ];

    pub fn class(self) -> RouteClass {
        match self {
            Route::Login | Route::Register => RouteClass::Auth,
            Route::Home
            | Route::Preferences
            | Route::CreateMatch
            | Route::FindMatches
            | Route::Matches
            | Route::Messages
            | Route::Settings => RouteClass::Protected,
        }
    }

    pub fn is_auth_route(self) -> bool {
        self.class() == RouteClass::Auth
    }

    /// Path as understood by the navigation host.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Preferences => "/preferences",
            Route::CreateMatch => "/create-match",
            Route::FindMatches => "/find-matches",
            Route::Matches => "/matches",
            Route::Messages => "/messages",
            Route::Settings => "/settings",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Accepts either the path (`/find-matches`) or the bare name (`find-matches`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let route = match name {
            "" | "home" | "index" => Route::Home,
            "login" => Route::Login,
            "register" => Route::Register,
            "preferences" => Route::Preferences,
            "create-match" => Route::CreateMatch,
            "find-matches" => Route::FindMatches,
            "matches" => Route::Matches,
            "messages" => Route::Messages,
            "settings" => Route::Settings,
            _ => return Err(UnknownRoute(s.to_string())),
        };
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_login_and_register_are_auth_routes() {
        let auth: Vec<Route> = Route::ALL
            .into_iter()
            .filter(|r| r.is_auth_route())
            .collect();
        assert_eq!(auth, vec![Route::Login, Route::Register]);
    }

    #[test]
    fn path_round_trips_through_from_str() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn bare_names_are_accepted() {
        assert_eq!("find-matches".parse::<Route>().unwrap(), Route::FindMatches);
        assert_eq!("home".parse::<Route>().unwrap(), Route::Home);
        assert!("/nowhere".parse::<Route>().is_err());
    }
}
