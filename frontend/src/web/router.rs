//! Browser history plumbing.
//!
//! All `window.history` access lives here. The controller decides where to
//! go; this module only mirrors its decisions into the URL bar and reports
//! back/forward moves.

use crate::auth::use_auth;
use leptos::prelude::*;
use tasktracker::{AppController, Navigation, Screen};
use wasm_bindgen::prelude::*;

// =========================================================
// History API
// =========================================================

/// Current browser path
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
        && let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path))
    {
        log::warn!("pushState to {} failed: {:?}", path, e);
    }
}

/// `Navigation` over the History API
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl Navigation for BrowserHistory {
    fn push_path(&self, path: &str) {
        push_history_state(path);
    }
}

/// Forwards back/forward button moves to the controller.
pub fn init_popstate_listener(controller: AppController) {
    let closure = Closure::<dyn Fn()>::new(move || {
        let path = current_path();
        log::debug!("popstate to {}", path);
        controller.sync_path(&path);
    });

    if let Some(window) = web_sys::window()
        && let Err(e) =
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
    {
        log::warn!("popstate listener not installed: {:?}", e);
    }

    // listener lives for the whole page
    closure.forget();
}

// =========================================================
// Outlet
// =========================================================

/// Renders the view for the current screen.
#[component]
pub fn RouterOutlet(
    /// Screen to view mapping
    matcher: fn(Screen) -> AnyView,
) -> impl IntoView {
    let state = use_auth().state;
    let screen = Memo::new(move |_| state.with(|state| state.screen()));

    move || matcher(screen.get())
}
