//! Navigation controller.
//!
//! Holds the state snapshot the UI renders and turns user intents into calls
//! on the identity provider, the user-info source and the navigation sink.
//! Everything runs on one thread; no `RefCell` borrow is held across an
//! `.await`.

use crate::error::{ErrorKind, Result, TrackerError};
use crate::identity::{AuthSession, IdentityProvider};
use crate::menu::{TopBar, TopBarAction};
use crate::route::{AppRoute, Screen, resolve_screen};
use std::cell::RefCell;
use std::rc::Rc;
use tasktracker_shared::{UpdateUserInfoRequest, UserInfo};

#[cfg(test)]
mod tests;

// =========================================================
// State
// =========================================================

/// Progress of the user-info request for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Pending,
    Loaded(UserInfo),
    Failed,
}

impl FetchState {
    /// The request has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Loaded(_) | FetchState::Failed)
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            FetchState::Loaded(info) => Some(info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub session: AuthSession,
    pub fetch: FetchState,
    pub route: AppRoute,
    /// Bumped every time an authenticated session ends
    pub generation: u64,
}

impl AppState {
    pub fn screen(&self) -> Screen {
        resolve_screen(&self.session, &self.fetch, &self.route)
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.fetch.user()
    }

    pub fn top_bar(&self) -> TopBar {
        TopBar::from_state(self)
    }

    pub fn profile_view(&self) -> ProfileView {
        match &self.fetch {
            FetchState::Loaded(info) => ProfileView::Ready(info.clone()),
            FetchState::Failed => ProfileView::Unavailable,
            FetchState::Idle | FetchState::Pending
                if self.session.is_loading || self.session.is_authenticated =>
            {
                ProfileView::Waiting
            }
            FetchState::Idle | FetchState::Pending => ProfileView::Unavailable,
        }
    }
}

/// What the profile screen has to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    /// Session or user info still resolving
    Waiting,
    /// Nothing to show or edit (fetch failed or no session)
    Unavailable,
    Ready(UserInfo),
}

/// Permission to complete the user-info fetch of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

// =========================================================
// Collaborators
// =========================================================

#[async_trait::async_trait(?Send)]
pub trait UserInfoSource {
    async fn fetch_user_info(&self) -> Result<UserInfo>;
    async fn update_user_info(&self, update: &UpdateUserInfoRequest) -> Result<UserInfo>;
}

/// Receives paths the controller navigates to (browser history).
pub trait Navigation {
    fn push_path(&self, path: &str);
}

type Listener = Rc<dyn Fn(&AppState)>;

// =========================================================
// Controller
// =========================================================

#[derive(Clone)]
pub struct AppController {
    state: Rc<RefCell<AppState>>,
    identity: Rc<dyn IdentityProvider>,
    user_info: Rc<dyn UserInfoSource>,
    navigation: Rc<dyn Navigation>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl AppController {
    pub fn new(
        identity: Rc<dyn IdentityProvider>,
        user_info: Rc<dyn UserInfoSource>,
        navigation: Rc<dyn Navigation>,
        initial_path: &str,
    ) -> Self {
        let state = AppState {
            session: AuthSession::loading(),
            route: AppRoute::from_path(initial_path),
            ..AppState::default()
        };

        Self {
            state: Rc::new(RefCell::new(state)),
            identity,
            user_info,
            navigation,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn screen(&self) -> Screen {
        self.state.borrow().screen()
    }

    pub fn top_bar(&self) -> TopBar {
        self.state.borrow().top_bar()
    }

    fn is_authenticated(&self) -> bool {
        self.state.borrow().session.is_authenticated
    }

    /// Registers a listener called with every new snapshot.
    pub fn subscribe(&self, listener: impl Fn(&AppState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let snapshot = self.state();
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = f(&mut *self.state.borrow_mut());
        self.notify();
        result
    }

    // --- Session ---

    /// Restores the provider's session and loads the user info if signed in.
    pub async fn start(&self) {
        let session = match self.identity.check_session().await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("{}", e.in_op("controller.start"));
                AuthSession::signed_out()
            }
        };
        self.apply_session(session).await;
    }

    pub async fn apply_session(&self, session: AuthSession) {
        if let Some(ticket) = self.set_session(session) {
            self.load_user_info(ticket).await;
        }
    }

    /// Stores a new session snapshot.
    ///
    /// Returns a ticket when the user-info fetch for this session should
    /// start now. At most one ticket is issued per authenticated session.
    pub fn set_session(&self, session: AuthSession) -> Option<FetchTicket> {
        self.update(|state| {
            if state.session.is_authenticated && !session.is_authenticated {
                state.generation += 1;
                state.fetch = FetchState::Idle;
                log::info!("session ended (generation {})", state.generation);
            }
            state.session = session;

            if state.session.is_established() && state.fetch == FetchState::Idle {
                state.fetch = FetchState::Pending;
                log::debug!("fetching user info (generation {})", state.generation);
                Some(FetchTicket {
                    generation: state.generation,
                })
            } else {
                None
            }
        })
    }

    pub async fn load_user_info(&self, ticket: FetchTicket) {
        let result = self.user_info.fetch_user_info().await;
        self.complete_fetch(ticket, result);
    }

    /// Applies a fetch result. Results from an ended session are dropped.
    pub fn complete_fetch(&self, ticket: FetchTicket, result: Result<UserInfo>) -> bool {
        let applied = {
            let mut state = self.state.borrow_mut();
            if ticket.generation != state.generation || state.fetch != FetchState::Pending {
                log::debug!(
                    "discarding user info for generation {} (current {})",
                    ticket.generation,
                    state.generation
                );
                false
            } else {
                state.fetch = match result {
                    Ok(info) => FetchState::Loaded(info),
                    Err(e) => {
                        let e = e.with_kind(ErrorKind::UserInfoFetchFailed);
                        log::warn!("{}", e.in_op("controller.complete_fetch"));
                        FetchState::Failed
                    }
                };
                true
            }
        };

        if applied {
            self.notify();
        }
        applied
    }

    // --- Intents ---

    pub async fn login(&self) {
        if self.is_authenticated() {
            log::debug!("login ignored, already authenticated");
            return;
        }

        if let Err(e) = self.identity.login_with_popup().await {
            let e = e.with_kind(ErrorKind::LoginFailed);
            log::warn!("{}", e.in_op("controller.login"));
            return;
        }

        match self.identity.check_session().await {
            Ok(session) => self.apply_session(session).await,
            Err(e) => log::warn!("{}", e.in_op("controller.login")),
        }
    }

    pub async fn logout(&self) {
        match self.identity.logout().await {
            Ok(()) => {
                self.set_session(AuthSession::signed_out());
            }
            Err(e) => {
                let e = e.with_kind(ErrorKind::LogoutFailed);
                log::warn!("{}", e.in_op("controller.logout"));
            }
        }
    }

    pub fn go_home(&self) {
        self.navigate(AppRoute::Home);
    }

    pub fn go_to_profile(&self) {
        self.navigate(AppRoute::Profile);
    }

    pub fn navigate(&self, route: AppRoute) {
        if self.state.borrow().route == route {
            return;
        }
        self.navigation.push_path(route.to_path());
        self.update(|state| state.route = route);
    }

    /// The browser moved to `path` on its own (back/forward).
    pub fn sync_path(&self, path: &str) {
        let route = AppRoute::from_path(path);
        self.update(|state| state.route = route);
    }

    pub async fn handle(&self, action: TopBarAction) {
        match action {
            TopBarAction::Login => self.login().await,
            TopBarAction::Logout => self.logout().await,
            TopBarAction::MyProfile => self.go_to_profile(),
            TopBarAction::Home => self.go_home(),
        }
    }

    /// Saves profile edits and stores the server's answer.
    pub async fn update_profile(&self, update: UpdateUserInfoRequest) -> Result<UserInfo> {
        let (generation, current) = {
            let state = self.state.borrow();
            match state.user() {
                Some(info) => (state.generation, info.clone()),
                None => {
                    return Err(TrackerError::user_info_fetch_failed("profile is not loaded")
                        .in_op("controller.update_profile"));
                }
            }
        };

        if update.is_empty() {
            return Ok(current);
        }

        let info = self
            .user_info
            .update_user_info(&update)
            .await
            .map_err(|e| e.in_op("controller.update_profile"))?;

        let applied = {
            let mut state = self.state.borrow_mut();
            if state.generation == generation && state.user().is_some() {
                state.fetch = FetchState::Loaded(info.clone());
                true
            } else {
                false
            }
        };
        if applied {
            self.notify();
        }

        Ok(info)
    }
}
