use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{FriendRequest, Post};

// -- JWT Claims --

/// JWT claims shared between token issuance (login) and the bearer-auth
/// middleware. Canonical definition lives here in kindred-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

// -- Posts --

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    /// Inline base64 data URI.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub remove_image: bool,
    /// Replacement image; wins over `remove_image` when both are set.
    pub image: Option<String>,
}

/// A post joined with its author's *current* username and avatar. The
/// `author_name` stored on the post itself stays as captured at creation.
#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: Option<String>,
}

// -- Social graph --

#[derive(Debug, Deserialize)]
pub struct SendFriendRequest {
    pub receiver_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RespondFriendRequest {
    /// Must be "accepted" or "rejected"; anything else is a bad request.
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct PendingRequestView {
    #[serde(flatten)]
    pub request: FriendRequest,
    pub sender_username: String,
}

// -- Messaging --

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Option<Uuid>,
    pub content: Option<String>,
}
