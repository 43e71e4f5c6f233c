//! Task Tracker client core.
//!
//! Platform-independent part of the web client:
//! - `route`: requested routes and the screen derived from the session
//! - `session`: the navigation controller and its state snapshot
//! - `identity`: the identity-provider seam
//! - `api` / `request`: typed REST client over an injected HTTP client
//! - `menu`: top app bar model
//!
//! The browser crate plugs in the concrete identity provider, HTTP client
//! and history; tests plug in fakes.

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod menu;
pub mod request;
pub mod route;
pub mod session;

pub use api::{ApiClient, AuthorizedUserInfo};
pub use config::AppConfig;
pub use error::{ErrorKind, Result, TrackerError};
pub use identity::{AuthSession, IdentityProvider, IdentityUser};
pub use menu::{MenuItem, TopBar, TopBarAction, UserMenu};
pub use route::{AppRoute, Screen};
pub use session::{
    AppController, AppState, FetchState, Navigation, ProfileView, UserInfoSource,
};
pub use tasktracker_shared::{UpdateUserInfoRequest, UserInfo};
