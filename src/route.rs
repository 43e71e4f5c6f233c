//! Routes and screen selection.
//!
//! Pure logic, no DOM access. The requested route comes from the URL; the
//! screen actually shown is derived from it together with the session and
//! the user-info fetch.

use crate::identity::AuthSession;
use crate::session::FetchState;
use std::fmt::Display;

// =========================================================
// Routes
// =========================================================

/// Requested application route
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Root,
    Home,
    Verify,
    Profile,
    /// Unmatched path, kept verbatim
    NotFound(String),
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Root,
            "/home" => Self::Home,
            "/verify" => Self::Verify,
            "/profile" => Self::Profile,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn to_path(&self) -> &str {
        match self {
            Self::Root => "/",
            Self::Home => "/home",
            Self::Verify => "/verify",
            Self::Profile => "/profile",
            Self::NotFound(path) => path,
        }
    }

    pub fn is_profile(&self) -> bool {
        matches!(self, Self::Profile)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// Screen Selection
// =========================================================

/// Screen rendered in the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Verify,
    Loading,
    Home,
    Profile,
}

/// Picks the screen for a state snapshot.
///
/// Rules apply in order:
/// 1. provider loading: `Loading`, or `Profile` when the profile was requested
/// 2. signed out: `Welcome`
/// 3. user info not fetched yet: same as 1
/// 4. email not verified (or unknown): `Verify`
/// 5. `Profile` for `/profile`, `Home` for everything else
pub fn resolve_screen(session: &AuthSession, fetch: &FetchState, route: &AppRoute) -> Screen {
    let waiting = if route.is_profile() {
        Screen::Profile
    } else {
        Screen::Loading
    };

    if session.is_loading {
        return waiting;
    }
    if !session.is_authenticated {
        return Screen::Welcome;
    }
    if !fetch.is_settled() {
        return waiting;
    }
    if session.email_verified() != Some(true) {
        return Screen::Verify;
    }

    match route {
        AppRoute::Profile => Screen::Profile,
        _ => Screen::Home,
    }
}
