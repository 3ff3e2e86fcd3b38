//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to edit the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub about_me: Option<String>,
}

/// Request to publish a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
}

/// Query string for paginated listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Short user reference embedded in other responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
}

/// A user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub about_me: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub avatar: String,
    pub followers_count: u64,
    pub followed_count: u64,
    /// Whether the caller follows this user; absent for anonymous callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

/// A post with its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub author: UserSummary,
}
