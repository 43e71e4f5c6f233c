use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// Constants
// =========================================================

pub const PATH_USER_INFO: &str = "/userinfo";
pub const PATH_USERS: &str = "/users";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// Domain Models
// =========================================================

/// Profile of the signed-in user as served by `GET /userinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub nickname: String,
    pub picture: String,
}

impl UserInfo {
    /// Name shown in greetings: nickname, then full name, then email.
    pub fn display_name(&self) -> String {
        if !self.nickname.trim().is_empty() {
            return self.nickname.clone();
        }

        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }

        self.email.clone()
    }

    /// Applies the fields present in a partial update.
    pub fn apply(&mut self, update: &UpdateUserInfoRequest) {
        if let Some(first_name) = &update.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &update.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(nickname) = &update.nickname {
            self.nickname = nickname.clone();
        }
    }
}

/// Entry of the `GET /users` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub email_verified: bool,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Body of `PATCH /userinfo`. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInfoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl UpdateUserInfoRequest {
    /// Only the editable fields that differ between `current` and `edited`.
    pub fn between(current: &UserInfo, edited: &UserInfo) -> Self {
        let changed = |old: &str, new: &str| (old != new.trim()).then(|| new.trim().to_string());
        Self {
            first_name: changed(&current.first_name, &edited.first_name),
            last_name: changed(&current.last_name, &edited.last_name),
            nickname: changed(&current.nickname, &edited.nickname),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.nickname.is_none()
    }
}
