use super::*;
use crate::identity::IdentityUser;
use crate::menu::{MenuItem, UserMenu};
use futures::channel::oneshot;
use std::cell::Cell;
use std::collections::VecDeque;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct FakeIdentity {
    session: RefCell<AuthSession>,
    /// Session reported after a successful login popup
    after_login: RefCell<Option<AuthSession>>,
    fail_check: Cell<bool>,
    fail_login: Cell<bool>,
    fail_logout: Cell<bool>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeIdentity {
    fn signed_in(verified: Option<bool>) -> Self {
        let identity = Self::default();
        *identity.session.borrow_mut() = verified_session(verified);
        identity
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FakeIdentity {
    async fn check_session(&self) -> Result<AuthSession> {
        self.calls.borrow_mut().push("check");
        if self.fail_check.get() {
            return Err(TrackerError::identity("tenant unreachable"));
        }
        Ok(self.session.borrow().clone())
    }

    async fn login_with_popup(&self) -> Result<()> {
        self.calls.borrow_mut().push("login");
        if self.fail_login.get() {
            return Err(TrackerError::identity("popup closed"));
        }
        if let Some(session) = self.after_login.borrow_mut().take() {
            *self.session.borrow_mut() = session;
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.calls.borrow_mut().push("logout");
        if self.fail_logout.get() {
            return Err(TrackerError::identity("logout cancelled"));
        }
        *self.session.borrow_mut() = AuthSession::signed_out();
        Ok(())
    }

    async fn access_token(&self) -> Result<String> {
        Ok("token".to_string())
    }
}

/// Hands out queued responses; each fetch waits on its own channel.
#[derive(Default)]
struct FakeUserInfo {
    queue: RefCell<VecDeque<oneshot::Receiver<Result<UserInfo>>>>,
    fetches: Cell<usize>,
    updates: RefCell<Vec<UpdateUserInfoRequest>>,
    fail_update: Cell<bool>,
}

impl FakeUserInfo {
    fn respond(&self, result: Result<UserInfo>) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        self.queue.borrow_mut().push_back(rx);
    }

    fn hold(&self) -> oneshot::Sender<Result<UserInfo>> {
        let (tx, rx) = oneshot::channel();
        self.queue.borrow_mut().push_back(rx);
        tx
    }
}

#[async_trait::async_trait(?Send)]
impl UserInfoSource for FakeUserInfo {
    async fn fetch_user_info(&self) -> Result<UserInfo> {
        self.fetches.set(self.fetches.get() + 1);
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TrackerError::http("request dropped"))),
            None => Err(TrackerError::http("no response queued")),
        }
    }

    async fn update_user_info(&self, update: &UpdateUserInfoRequest) -> Result<UserInfo> {
        self.updates.borrow_mut().push(update.clone());
        if self.fail_update.get() {
            return Err(TrackerError::status(422, "nickname taken"));
        }
        let mut info = dave();
        info.apply(update);
        Ok(info)
    }
}

#[derive(Default)]
struct RecordingNavigation {
    paths: RefCell<Vec<String>>,
}

impl Navigation for RecordingNavigation {
    fn push_path(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_string());
    }
}

struct Harness {
    identity: Rc<FakeIdentity>,
    user_info: Rc<FakeUserInfo>,
    navigation: Rc<RecordingNavigation>,
    controller: AppController,
}

fn harness(identity: FakeIdentity, path: &str) -> Harness {
    let identity = Rc::new(identity);
    let user_info = Rc::new(FakeUserInfo::default());
    let navigation = Rc::new(RecordingNavigation::default());
    let controller = AppController::new(
        identity.clone(),
        user_info.clone(),
        navigation.clone(),
        path,
    );
    Harness {
        identity,
        user_info,
        navigation,
        controller,
    }
}

fn verified_session(verified: Option<bool>) -> AuthSession {
    AuthSession::signed_in(IdentityUser {
        email_verified: verified,
        ..Default::default()
    })
}

fn dave() -> UserInfo {
    UserInfo {
        first_name: "David".into(),
        last_name: "Jones".into(),
        email: "dave@example.com".into(),
        nickname: "Dave".into(),
        picture: "https://example.com".into(),
    }
}

// =========================================================
// Startup
// =========================================================

#[test]
fn test_initial_state_is_loading() {
    let h = harness(FakeIdentity::default(), "/home");
    assert_eq!(h.controller.screen(), Screen::Loading);
    assert_eq!(h.controller.top_bar(), TopBar::Guest);
}

#[test]
fn test_profile_stays_visible_while_provider_loads() {
    let h = harness(FakeIdentity::default(), "/profile");
    assert_eq!(h.controller.screen(), Screen::Profile);
}

#[tokio::test]
async fn test_signed_out_start_shows_welcome_for_every_path() {
    for path in ["/home", "/verify", "/profile", "/", "/unknown-route"] {
        let h = harness(FakeIdentity::default(), path);
        h.controller.start().await;

        assert_eq!(h.controller.screen(), Screen::Welcome, "{path}");
        assert_eq!(h.controller.top_bar(), TopBar::Guest);
        assert_eq!(h.user_info.fetches.get(), 0);
    }
}

#[tokio::test]
async fn test_session_check_failure_counts_as_signed_out() {
    let identity = FakeIdentity::signed_in(Some(true));
    identity.fail_check.set(true);
    let h = harness(identity, "/home");

    h.controller.start().await;

    assert_eq!(h.controller.screen(), Screen::Welcome);
}

#[tokio::test]
async fn test_verified_user_lands_on_home_with_nickname() {
    for path in ["/home", "/verify", "/"] {
        let h = harness(FakeIdentity::signed_in(Some(true)), path);
        h.user_info.respond(Ok(dave()));

        h.controller.start().await;

        let state = h.controller.state();
        assert_eq!(state.screen(), Screen::Home, "{path}");
        assert_eq!(state.user().unwrap().display_name(), "Dave");
        assert_eq!(
            state.top_bar(),
            TopBar::Member {
                nickname: Some("Dave".into()),
                picture: Some("https://example.com".into()),
            }
        );
    }
}

#[tokio::test]
async fn test_verified_user_on_profile_path_sees_profile() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/profile");
    h.user_info.respond(Ok(UserInfo::default()));

    h.controller.start().await;

    assert_eq!(h.controller.screen(), Screen::Profile);
}

#[tokio::test]
async fn test_unverified_user_sees_verify_for_every_path() {
    for path in ["/home", "/verify", "/profile", "/"] {
        let h = harness(FakeIdentity::signed_in(Some(false)), path);
        h.user_info.respond(Ok(UserInfo::default()));

        h.controller.start().await;

        assert_eq!(h.controller.screen(), Screen::Verify, "{path}");
    }
}

// =========================================================
// User info fetch
// =========================================================

#[tokio::test]
async fn test_pending_fetch_keeps_spinner() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/home");
    let _tx = h.user_info.hold();

    let mut start = Box::pin(h.controller.start());
    assert!(futures::poll!(&mut start).is_pending());

    assert_eq!(h.controller.state().fetch, FetchState::Pending);
    assert_eq!(h.controller.screen(), Screen::Loading);
}

#[tokio::test]
async fn test_spinner_removed_when_fetch_completes() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/home");
    let tx = h.user_info.hold();

    let mut start = Box::pin(h.controller.start());
    assert!(futures::poll!(&mut start).is_pending());
    assert_eq!(h.controller.screen(), Screen::Loading);

    tx.send(Ok(dave())).unwrap();
    start.await;

    assert_eq!(h.controller.screen(), Screen::Home);
}

#[tokio::test]
async fn test_fetch_failure_removes_spinner_without_label() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/home");
    h.user_info
        .respond(Err(TrackerError::status(500, "internal error")));

    h.controller.start().await;

    let state = h.controller.state();
    assert_eq!(state.fetch, FetchState::Failed);
    assert_eq!(state.screen(), Screen::Home);
    assert_eq!(
        state.top_bar(),
        TopBar::Member {
            nickname: None,
            picture: None
        }
    );
}

#[tokio::test]
async fn test_fetch_failure_on_profile_path_shows_empty_profile() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/profile");
    h.user_info.respond(Err(TrackerError::status(500, "internal error")));

    h.controller.start().await;

    let state = h.controller.state();
    assert_eq!(state.screen(), Screen::Profile);
    assert_eq!(state.profile_view(), ProfileView::Unavailable);
    assert_eq!(
        state.top_bar(),
        TopBar::Member {
            nickname: None,
            picture: None
        }
    );
}

#[tokio::test]
async fn test_profile_view_follows_fetch() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/profile");
    assert_eq!(h.controller.state().profile_view(), ProfileView::Waiting);

    let tx = h.user_info.hold();
    let mut start = Box::pin(h.controller.start());
    assert!(futures::poll!(&mut start).is_pending());
    assert_eq!(h.controller.state().profile_view(), ProfileView::Waiting);

    tx.send(Ok(dave())).unwrap();
    start.await;
    assert_eq!(h.controller.state().profile_view(), ProfileView::Ready(dave()));

    h.controller.logout().await;
    assert_eq!(h.controller.state().profile_view(), ProfileView::Unavailable);
}

#[tokio::test]
async fn test_fetch_failure_still_checks_verification() {
    let h = harness(FakeIdentity::signed_in(Some(false)), "/home");
    h.user_info.respond(Err(TrackerError::http("offline")));

    h.controller.start().await;

    assert_eq!(h.controller.screen(), Screen::Verify);
}

#[test]
fn test_fetch_triggered_once_per_session() {
    let h = harness(FakeIdentity::default(), "/");

    let first = h.controller.set_session(verified_session(Some(true)));
    let second = h.controller.set_session(verified_session(Some(true)));

    assert!(first.is_some());
    assert!(second.is_none());
}

#[test]
fn test_no_fetch_while_provider_loading() {
    let h = harness(FakeIdentity::default(), "/");
    let mut session = verified_session(Some(true));
    session.is_loading = true;

    assert!(h.controller.set_session(session).is_none());
    assert_eq!(h.controller.state().fetch, FetchState::Idle);
}

#[test]
fn test_ticket_from_ended_session_is_rejected() {
    let h = harness(FakeIdentity::default(), "/");
    let ticket = h.controller.set_session(verified_session(Some(true))).unwrap();

    h.controller.set_session(AuthSession::signed_out());
    let fresh = h.controller.set_session(verified_session(Some(true))).unwrap();

    assert_ne!(ticket, fresh);
    assert!(!h.controller.complete_fetch(ticket, Ok(dave())));
    assert_eq!(h.controller.state().fetch, FetchState::Pending);
    assert!(h.controller.complete_fetch(fresh, Ok(dave())));
    assert!(!h.controller.complete_fetch(fresh, Ok(UserInfo::default())));
    assert_eq!(h.controller.state().user(), Some(&dave()));
}

#[tokio::test]
async fn test_logout_during_fetch_discards_late_result() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/home");
    let tx = h.user_info.hold();

    let mut start = Box::pin(h.controller.start());
    assert!(futures::poll!(&mut start).is_pending());

    h.controller.logout().await;
    tx.send(Ok(dave())).unwrap();
    start.await;

    let state = h.controller.state();
    assert_eq!(state.generation, 1);
    assert_eq!(state.fetch, FetchState::Idle);
    assert!(state.user().is_none());
    assert_eq!(state.screen(), Screen::Welcome);
}

// =========================================================
// Login / logout
// =========================================================

#[tokio::test]
async fn test_login_flow_reaches_home() {
    let identity = FakeIdentity::default();
    *identity.after_login.borrow_mut() = Some(verified_session(Some(true)));
    let h = harness(identity, "/");
    h.user_info.respond(Ok(dave()));

    h.controller.start().await;
    assert_eq!(h.controller.screen(), Screen::Welcome);

    h.controller.handle(TopBarAction::Login).await;

    let state = h.controller.state();
    assert_eq!(state.screen(), Screen::Home);
    assert!(state.user().unwrap().display_name().contains("Dave"));
    assert_eq!(*h.identity.calls.borrow(), ["check", "login", "check"]);
}

#[tokio::test]
async fn test_failed_login_keeps_login_button() {
    let identity = FakeIdentity::default();
    identity.fail_login.set(true);
    let h = harness(identity, "/");

    h.controller.start().await;
    h.controller.login().await;

    assert_eq!(h.controller.screen(), Screen::Welcome);
    assert_eq!(h.controller.top_bar(), TopBar::Guest);
    assert_eq!(h.user_info.fetches.get(), 0);
    assert_eq!(*h.identity.calls.borrow(), ["check", "login"]);
}

#[tokio::test]
async fn test_login_when_authenticated_is_noop() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/");
    h.user_info.respond(Ok(dave()));
    h.controller.start().await;

    h.controller.login().await;

    assert_eq!(*h.identity.calls.borrow(), ["check"]);
    assert_eq!(h.user_info.fetches.get(), 1);
}

#[tokio::test]
async fn test_logout_from_menu_signs_out() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/home");
    h.user_info.respond(Ok(dave()));
    h.controller.start().await;

    let mut menu = UserMenu::default();
    menu.open();
    h.controller.handle(menu.select(MenuItem::Logout)).await;

    let state = h.controller.state();
    assert!(!menu.is_open());
    assert!(!state.session.is_authenticated);
    assert!(state.user().is_none());
    assert_eq!(state.screen(), Screen::Welcome);
    assert_eq!(state.top_bar(), TopBar::Guest);
}

#[tokio::test]
async fn test_failed_logout_keeps_avatar() {
    let identity = FakeIdentity::signed_in(Some(true));
    identity.fail_logout.set(true);
    let h = harness(identity, "/home");
    h.user_info.respond(Ok(dave()));
    h.controller.start().await;

    let mut menu = UserMenu::default();
    menu.open();
    h.controller.handle(menu.select(MenuItem::Logout)).await;

    let state = h.controller.state();
    assert!(state.session.is_authenticated);
    assert_eq!(state.generation, 0);
    assert_eq!(
        state.top_bar(),
        TopBar::Member {
            nickname: Some("Dave".into()),
            picture: Some("https://example.com".into()),
        }
    );
    assert_eq!(*h.identity.calls.borrow(), ["check", "logout"]);
}

// =========================================================
// Navigation
// =========================================================

#[tokio::test]
async fn test_menu_and_logo_navigation() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/");
    h.user_info.respond(Ok(dave()));
    h.controller.start().await;

    let mut menu = UserMenu::default();
    menu.open();
    h.controller.handle(menu.select(MenuItem::MyProfile)).await;
    assert_eq!(h.controller.screen(), Screen::Profile);

    h.controller.handle(TopBarAction::Home).await;
    assert_eq!(h.controller.screen(), Screen::Home);
    assert_eq!(h.controller.state().route, AppRoute::Home);

    assert_eq!(*h.navigation.paths.borrow(), ["/profile", "/home"]);
}

#[test]
fn test_navigating_to_current_route_pushes_nothing() {
    let h = harness(FakeIdentity::default(), "/home");
    h.controller.go_home();
    assert!(h.navigation.paths.borrow().is_empty());
}

#[test]
fn test_sync_path_does_not_push_history() {
    let h = harness(FakeIdentity::default(), "/home");
    h.controller.sync_path("/profile");

    assert_eq!(h.controller.state().route, AppRoute::Profile);
    assert!(h.navigation.paths.borrow().is_empty());
}

#[tokio::test]
async fn test_listeners_receive_each_snapshot() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/");
    h.user_info.respond(Ok(dave()));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.controller
        .subscribe(move |state| sink.borrow_mut().push(state.screen()));

    h.controller.start().await;

    assert_eq!(*seen.borrow(), [Screen::Loading, Screen::Home]);
}

// =========================================================
// Profile edits
// =========================================================

#[tokio::test]
async fn test_update_profile_replaces_user_info() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/profile");
    h.user_info.respond(Ok(dave()));
    h.controller.start().await;

    let update = UpdateUserInfoRequest {
        nickname: Some("Davey".into()),
        ..Default::default()
    };
    let info = h.controller.update_profile(update.clone()).await.unwrap();

    assert_eq!(info.nickname, "Davey");
    assert_eq!(h.controller.state().user().unwrap().nickname, "Davey");
    assert_eq!(*h.user_info.updates.borrow(), [update]);
}

#[tokio::test]
async fn test_update_profile_error_is_returned() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/profile");
    h.user_info.respond(Ok(dave()));
    h.user_info.fail_update.set(true);
    h.controller.start().await;

    let err = h
        .controller
        .update_profile(UpdateUserInfoRequest {
            nickname: Some("taken".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Status(422));
    assert_eq!(h.controller.state().user().unwrap().nickname, "Dave");
}

#[tokio::test]
async fn test_update_profile_requires_loaded_user() {
    let h = harness(FakeIdentity::default(), "/profile");
    h.controller.start().await;

    let err = h
        .controller
        .update_profile(UpdateUserInfoRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::UserInfoFetchFailed);
    assert!(h.user_info.updates.borrow().is_empty());
}

#[tokio::test]
async fn test_empty_update_skips_request() {
    let h = harness(FakeIdentity::signed_in(Some(true)), "/profile");
    h.user_info.respond(Ok(dave()));
    h.controller.start().await;

    let info = h
        .controller
        .update_profile(UpdateUserInfoRequest::default())
        .await
        .unwrap();

    assert_eq!(info, dave());
    assert!(h.user_info.updates.borrow().is_empty());
}
