use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub bio: String,
    /// Inline base64 data URI; empty string when the user has no avatar.
    #[serde(default)]
    pub avatar: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub interest: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The account as exposed over the API — everything but the credential hash.
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
            avatar: self.avatar.clone(),
            age: self.age,
            gender: self.gender.clone(),
            interest: self.interest.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub interest: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update. Only fields the caller actually supplied overwrite
/// the stored values; everything left as `None` keeps its prior value.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub interest: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(&self, account: &mut Account) {
        if let Some(bio) = &self.bio {
            account.bio = bio.clone();
        }
        if let Some(age) = self.age {
            account.age = Some(age);
        }
        if let Some(gender) = &self.gender {
            account.gender = Some(gender.clone());
        }
        if let Some(interest) = &self.interest {
            account.interest = Some(interest.clone());
        }
        if let Some(avatar) = &self.avatar {
            account.avatar = avatar.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Captured at creation time; not refreshed if the author renames.
    pub author_name: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(default)]
    pub likes: Vec<Uuid>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Flip `user` in the like set. Returns the resulting state: true = liked.
    pub fn toggle_like(&mut self, user: Uuid) -> bool {
        if let Some(pos) = self.likes.iter().position(|&u| u == user) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user);
            true
        }
    }
}

/// Always embedded in exactly one post; comments have no standalone storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRequest {
    /// True when the request connects `a` and `b` in either direction.
    pub fn involves(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }

    /// Pending and accepted requests block new requests for the same pair.
    pub fn is_active(&self) -> bool {
        matches!(self.status, RequestStatus::Pending | RequestStatus::Accepted)
    }

    /// The party that is not `user`, for resolving the friend side of an
    /// accepted request.
    pub fn other_party(&self, user: Uuid) -> Uuid {
        if self.sender_id == user {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message belongs to the conversation between `a` and `b`.
    pub fn between(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}
