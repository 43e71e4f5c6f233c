//! Top app bar model.

use crate::session::AppState;

// =========================================================
// Top Bar
// =========================================================

/// Intent raised by the top app bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    Login,
    Logout,
    MyProfile,
    Home,
}

/// Right-hand side of the bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopBar {
    /// Login button
    Guest,
    /// Avatar opening the user menu. Label and picture are absent until the
    /// user info has been fetched.
    Member {
        nickname: Option<String>,
        picture: Option<String>,
    },
}

impl TopBar {
    pub fn from_state(state: &AppState) -> Self {
        if !state.session.is_authenticated {
            return TopBar::Guest;
        }

        let user = state.user();
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        TopBar::Member {
            nickname: user.and_then(|u| non_empty(&u.nickname)),
            picture: user.and_then(|u| non_empty(&u.picture)),
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self, TopBar::Member { .. })
    }
}

// =========================================================
// User Menu
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    MyProfile,
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::MyProfile, MenuItem::Logout];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::MyProfile => "My Profile",
            MenuItem::Logout => "Logout",
        }
    }

    pub fn action(&self) -> TopBarAction {
        match self {
            MenuItem::MyProfile => TopBarAction::MyProfile,
            MenuItem::Logout => TopBarAction::Logout,
        }
    }
}

/// Open/closed state of the avatar menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserMenu {
    open: bool,
}

impl UserMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Closes the menu and returns the chosen intent.
    pub fn select(&mut self, item: MenuItem) -> TopBarAction {
        self.open = false;
        item.action()
    }
}
