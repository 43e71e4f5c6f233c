//! Authentication.
//!
//! `Auth0Adapter` drives the Auth0 SPA SDK (`auth0-spa-js`, loaded as the
//! `auth0` global by index.html) behind the core `IdentityProvider` seam.
//! `AuthContext` mirrors the controller's state into a signal for the view.

use crate::serde_helper::{self, js_message};
use async_trait::async_trait;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use serde::Serialize;
use std::cell::RefCell;
use tasktracker::{
    AppConfig, AppController, AppState, AuthSession, IdentityProvider, IdentityUser, Result,
    TopBarAction, TrackerError,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

// =========================================================
// SDK bindings
// =========================================================

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    type Auth0Client;

    #[wasm_bindgen(catch, js_namespace = auth0, js_name = createAuth0Client)]
    async fn create_auth0_client(options: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = loginWithPopup)]
    async fn login_with_popup(this: &Auth0Client) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = logout)]
    async fn sign_out(this: &Auth0Client, options: JsValue)
    -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = isAuthenticated)]
    async fn is_authenticated(this: &Auth0Client) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getUser)]
    async fn get_user(this: &Auth0Client) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getTokenSilently)]
    async fn get_token_silently(this: &Auth0Client) -> std::result::Result<JsValue, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientOptions<'a> {
    domain: &'a str,
    client_id: &'a str,
    authorization_params: AuthorizationParams<'a>,
}

// The SDK expects OAuth parameter names here, not camelCase
#[derive(Serialize)]
struct AuthorizationParams<'a> {
    redirect_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audience: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutOptions {
    logout_params: LogoutParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutParams {
    return_to: String,
}

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

fn sdk_error(op: &str, e: JsValue) -> TrackerError {
    TrackerError::identity(js_message(&e)).in_op(op)
}

// =========================================================
// Identity provider
// =========================================================

/// Auth0-backed identity provider.
///
/// The SDK client is created lazily on first use and cached.
pub struct Auth0Adapter {
    config: AppConfig,
    client: RefCell<Option<Auth0Client>>,
}

impl Auth0Adapter {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: RefCell::new(None),
        }
    }

    async fn client(&self) -> Result<Auth0Client> {
        let cached = self.client.borrow().clone();
        if let Some(client) = cached {
            return Ok(client);
        }

        let options = serde_helper::to_value(&ClientOptions {
            domain: &self.config.auth_domain,
            client_id: &self.config.auth_client_id,
            authorization_params: AuthorizationParams {
                redirect_uri: origin(),
                audience: self.config.auth_audience.as_deref(),
            },
        })
        .map_err(|e| e.in_op("auth0.client"))?;

        let client: Auth0Client = create_auth0_client(options)
            .await
            .map_err(|e| sdk_error("auth0.client", e))?
            .unchecked_into();

        log::debug!("auth0 client ready for {}", self.config.auth_domain);
        *self.client.borrow_mut() = Some(client.clone());
        Ok(client)
    }
}

#[async_trait(?Send)]
impl IdentityProvider for Auth0Adapter {
    async fn check_session(&self) -> Result<AuthSession> {
        let client = self.client().await?;

        let authenticated = client
            .is_authenticated()
            .await
            .map_err(|e| sdk_error("auth0.is_authenticated", e))?
            .as_bool()
            .unwrap_or(false);
        if !authenticated {
            return Ok(AuthSession::signed_out());
        }

        let claims = client
            .get_user()
            .await
            .map_err(|e| sdk_error("auth0.get_user", e))?;
        let user = if claims.is_undefined() || claims.is_null() {
            IdentityUser::default()
        } else {
            serde_helper::from_value(claims).map_err(|e| e.in_op("auth0.get_user"))?
        };

        Ok(AuthSession::signed_in(user))
    }

    async fn login_with_popup(&self) -> Result<()> {
        let client = self.client().await?;
        client
            .login_with_popup()
            .await
            .map_err(|e| {
                TrackerError::login_failed(js_message(&e)).in_op("auth0.login_with_popup")
            })?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let client = self.client().await?;
        let options = serde_helper::to_value(&LogoutOptions {
            logout_params: LogoutParams { return_to: origin() },
        })
        .map_err(|e| e.in_op("auth0.logout"))?;

        client
            .sign_out(options)
            .await
            .map_err(|e| TrackerError::logout_failed(js_message(&e)).in_op("auth0.logout"))?;
        Ok(())
    }

    async fn access_token(&self) -> Result<String> {
        let client = self.client().await?;
        client
            .get_token_silently()
            .await
            .map_err(|e| sdk_error("auth0.get_token_silently", e))?
            .as_string()
            .ok_or_else(|| {
                TrackerError::identity("token is not a string").in_op("auth0.get_token_silently")
            })
    }
}

// =========================================================
// Reactive context
// =========================================================

/// Controller handle plus a signal tracking its state.
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Latest controller snapshot
    pub state: ReadSignal<AppState>,
    controller: StoredValue<AppController, LocalStorage>,
}

impl AuthContext {
    pub fn new(controller: AppController) -> Self {
        let (state, set_state) = signal(controller.state());
        controller.subscribe(move |snapshot| set_state.set(snapshot.clone()));

        Self {
            state,
            controller: StoredValue::new_local(controller),
        }
    }

    pub fn controller(&self) -> AppController {
        self.controller.get_value()
    }

    /// Runs a top bar action in the background.
    pub fn dispatch(&self, action: TopBarAction) {
        let controller = self.controller();
        spawn_local(async move { controller.handle(action).await });
    }
}

/// Get the authentication context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
