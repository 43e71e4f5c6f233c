//! Typed client for the Task Tracker REST API.

use crate::error::{ErrorKind, Result, TrackerError};
use crate::identity::IdentityProvider;
use crate::request::{HttpClient, HttpRequest};
use crate::session::UserInfoSource;
use std::rc::Rc;
use tasktracker_shared::protocol::{ApiRequest, GetUserInfoRequest, ListUsersRequest};
use tasktracker_shared::{
    CreateUserRequest, HEADER_AUTHORIZATION, UpdateUserInfoRequest, User, UserInfo,
};

// =========================================================
// API Client
// =========================================================

#[derive(Clone, Debug)]
pub struct ApiClient<C: HttpClient> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends an endpoint request and decodes its response.
    pub async fn send<R: ApiRequest>(&self, request: &R, token: Option<&str>) -> Result<R::Response> {
        let endpoint = format!("{} {}", R::METHOD.as_str(), R::PATH);
        let mut req = HttpRequest::new(&self.url(R::PATH), R::METHOD)
            .with_header("Accept", "application/json");

        if let Some(token) = token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        if R::METHOD.has_body() {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(serde_json::to_value(request)?);
        }

        let res = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op_with("api.send", endpoint.as_str()))?;

        if !res.ok() {
            log::warn!("{} answered {}", endpoint, res.status);
            return Err(TrackerError::status(res.status, res.body.clone())
                .in_op_with("api.send", endpoint.as_str()));
        }

        res.json::<R::Response>()
            .map_err(|e| e.in_op_with("api.decode", endpoint.as_str()))
    }

    pub async fn get_user_info(&self, token: Option<&str>) -> Result<UserInfo> {
        self.send(&GetUserInfoRequest, token).await
    }

    pub async fn update_user_info(
        &self,
        update: &UpdateUserInfoRequest,
        token: Option<&str>,
    ) -> Result<UserInfo> {
        self.send(update, token).await
    }

    pub async fn list_users(&self, token: Option<&str>) -> Result<Vec<User>> {
        self.send(&ListUsersRequest, token).await
    }

    pub async fn create_user(&self, user: &CreateUserRequest, token: Option<&str>) -> Result<User> {
        self.send(user, token).await
    }
}

// =========================================================
// User info source backed by the API
// =========================================================

/// Fetches the profile with an access token obtained from the identity provider.
pub struct AuthorizedUserInfo<C: HttpClient> {
    api: ApiClient<C>,
    identity: Rc<dyn IdentityProvider>,
}

impl<C: HttpClient> AuthorizedUserInfo<C> {
    pub fn new(api: ApiClient<C>, identity: Rc<dyn IdentityProvider>) -> Self {
        Self { api, identity }
    }

    async fn token(&self) -> Result<String> {
        self.identity
            .access_token()
            .await
            .map_err(|e| e.in_op("user_info.token"))
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> UserInfoSource for AuthorizedUserInfo<C> {
    async fn fetch_user_info(&self) -> Result<UserInfo> {
        let token = self
            .token()
            .await
            .map_err(|e| e.with_kind(ErrorKind::UserInfoFetchFailed))?;

        self.api
            .get_user_info(Some(&token))
            .await
            .map_err(|e| e.with_kind(ErrorKind::UserInfoFetchFailed).in_op("user_info.fetch"))
    }

    async fn update_user_info(&self, update: &UpdateUserInfoRequest) -> Result<UserInfo> {
        let token = self.token().await?;
        self.api
            .update_user_info(update, Some(&token))
            .await
            .map_err(|e| e.in_op("user_info.update"))
    }
}
