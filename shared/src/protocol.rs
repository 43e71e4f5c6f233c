use crate::{
    CreateUserRequest, PATH_USER_INFO, PATH_USERS, UpdateUserInfoRequest, User, UserInfo,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// =========================================================
// Endpoint Contract
// =========================================================

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Fetch the signed-in user's profile
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetUserInfoRequest;

impl ApiRequest for GetUserInfoRequest {
    type Response = UserInfo;
    const PATH: &'static str = PATH_USER_INFO;
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Update the signed-in user's profile, returns the stored profile
impl ApiRequest for UpdateUserInfoRequest {
    type Response = UserInfo;
    const PATH: &'static str = PATH_USER_INFO;
    const METHOD: HttpMethod = HttpMethod::Patch;
}

/// List all users
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const PATH: &'static str = PATH_USERS;
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Register a user
impl ApiRequest for CreateUserRequest {
    type Response = User;
    const PATH: &'static str = PATH_USERS;
    const METHOD: HttpMethod = HttpMethod::Post;
}
