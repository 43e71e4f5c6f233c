//! Task Tracker web frontend
//!
//! Thin browser shell around the `tasktracker` core:
//! - `auth`: Auth0 adapter and the reactive controller context
//! - `web::http`: `fetch` transport for the API client
//! - `web::router`: History API sink and the screen outlet
//! - `components`: UI layer

mod auth;
mod components {
    pub mod home;
    pub mod loading;
    pub mod profile;
    pub mod top_app_bar;
    pub mod unverified;
    pub mod welcome;
}
mod serde_helper;

use crate::auth::{Auth0Adapter, AuthContext};
use crate::components::home::HomePage;
use crate::components::loading::LoadingScreen;
use crate::components::profile::ProfilePage;
use crate::components::top_app_bar::TopAppBar;
use crate::components::unverified::UnverifiedScreen;
use crate::components::welcome::WelcomeScreen;

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use tasktracker::config::{
    KEY_API_BASE_URL, KEY_AUTH_AUDIENCE, KEY_AUTH_CLIENT_ID, KEY_AUTH_DOMAIN, KEY_LOG_LEVEL,
};
use tasktracker::{ApiClient, AppConfig, AppController, AuthorizedUserInfo, Screen, TopBarAction};

// Browser API wrappers over web_sys
pub(crate) mod web {
    pub mod http;
    pub mod router;

    pub use http::FetchClient;
    pub use router::BrowserHistory;
}

use web::router::{RouterOutlet, current_path, init_popstate_listener};
use web::{BrowserHistory, FetchClient};

/// Settings baked in at build time (`TASKTRACKER_*` environment variables).
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        KEY_API_BASE_URL => option_env!("TASKTRACKER_API_BASE_URL"),
        KEY_AUTH_DOMAIN => option_env!("TASKTRACKER_AUTH_DOMAIN"),
        KEY_AUTH_CLIENT_ID => option_env!("TASKTRACKER_AUTH_CLIENT_ID"),
        KEY_AUTH_AUDIENCE => option_env!("TASKTRACKER_AUTH_AUDIENCE"),
        KEY_LOG_LEVEL => option_env!("TASKTRACKER_LOG_LEVEL"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Resolves the build-time configuration.
pub fn app_config() -> AppConfig {
    AppConfig::from_lookup(build_env)
}

fn screen_matcher(screen: Screen) -> AnyView {
    match screen {
        Screen::Loading => view! { <LoadingScreen /> }.into_any(),
        Screen::Welcome => view! { <WelcomeScreen /> }.into_any(),
        Screen::Verify => view! { <UnverifiedScreen /> }.into_any(),
        Screen::Home => view! { <HomePage /> }.into_any(),
        Screen::Profile => view! { <ProfilePage /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. wire the controller to the browser
    let identity = Rc::new(Auth0Adapter::new(config.clone()));
    let api = ApiClient::new(config.api_base_url.clone(), FetchClient);
    let user_info = Rc::new(AuthorizedUserInfo::new(api, identity.clone()));
    let controller = AppController::new(
        identity,
        user_info,
        Rc::new(BrowserHistory),
        &current_path(),
    );
    init_popstate_listener(controller.clone());

    // 2. expose it to the components
    let auth = AuthContext::new(controller.clone());
    provide_context(auth);

    // 3. restore the session
    spawn_local(async move { controller.start().await });

    let state = auth.state;
    let bar = Signal::derive(move || state.with(|s| s.top_bar()));

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <TopAppBar
                bar=bar
                on_login=move |_| auth.dispatch(TopBarAction::Login)
                on_logout=move |_| auth.dispatch(TopBarAction::Logout)
                on_my_profile=move |_| auth.dispatch(TopBarAction::MyProfile)
                on_home=move |_| auth.dispatch(TopBarAction::Home)
            />
            <main class="container mx-auto p-4">
                <RouterOutlet matcher=screen_matcher />
            </main>
        </div>
    }
}
