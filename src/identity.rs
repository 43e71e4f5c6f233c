//! Identity provider seam.
//!
//! The provider owns the authentication session. The core only reads
//! snapshots of it and asks the provider to log in or out.

use crate::error::Result;
use serde::{Deserialize, Serialize};

// =========================================================
// Session
// =========================================================

/// Claims the identity provider reports for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Snapshot of the provider's session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    /// Provider is still resolving the session
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user: Option<IdentityUser>,
}

impl AuthSession {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: IdentityUser) -> Self {
        Self {
            is_loading: false,
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// `None` when the provider did not report the claim.
    pub fn email_verified(&self) -> Option<bool> {
        self.user.as_ref().and_then(|u| u.email_verified)
    }

    /// Authenticated and done loading.
    pub fn is_established(&self) -> bool {
        self.is_authenticated && !self.is_loading
    }
}

// =========================================================
// Provider Seam
// =========================================================

#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    /// Resolves the current session. The returned snapshot is never loading.
    async fn check_session(&self) -> Result<AuthSession>;

    /// Runs the interactive login. Resolves once the popup completes.
    async fn login_with_popup(&self) -> Result<()>;

    async fn logout(&self) -> Result<()>;

    /// Bearer token for API calls.
    async fn access_token(&self) -> Result<String>;
}
