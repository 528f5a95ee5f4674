//! Data Transfer Objects - request/response types for the API.
//!
//! JSON field names are camelCase to match the client. Reference fields in
//! responses are populated: replaced by the referenced entity's summary so
//! the client needs no follow-up lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skillswap_core::domain::{Message, Skill, User, UserSkills};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing an access token (OAuth-style field names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub skills_to_share: Option<Vec<Uuid>>,
    pub skills_to_learn: Option<Vec<Uuid>>,
}

/// Request to create a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
}

/// Request to send a direct message.
///
/// Fields are optional so that validation can name the missing one instead
/// of failing at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: Option<String>,
    pub receiver_id: Option<Uuid>,
}

/// Request to mark all messages from a sender as read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub sender_id: Option<Uuid>,
}

/// Public profile summary, embedded wherever a user reference is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            image: user.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
        }
    }
}

/// Full user profile. Deliberately has no password field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub skills_to_share: Vec<SkillResponse>,
    pub skills_to_learn: Vec<SkillResponse>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_parts(user: User, skills: UserSkills) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
            bio: user.bio,
            skills_to_share: skills.to_share.into_iter().map(Into::into).collect(),
            skills_to_learn: skills.to_learn.into_iter().map(Into::into).collect(),
            created_at: user.created_at,
        }
    }
}

/// Post with author, skill and like-set populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub author: UserSummary,
    pub skill: SkillResponse,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message with both participants populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub content: String,
    pub read: bool,
    pub sender: UserSummary,
    pub receiver: UserSummary,
    pub created_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn from_parts(message: Message, sender: UserSummary, receiver: UserSummary) -> Self {
        Self {
            id: message.id,
            content: message.content,
            read: message.read,
            sender,
            receiver,
            created_at: message.created_at,
        }
    }
}

/// One entry of the conversation list: counterparty plus newest message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub user: UserSummary,
    pub last_message: MessageResponse,
}

/// Result of a like toggle: the post's resulting like-set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub post_id: Uuid,
    pub likes: Vec<Uuid>,
}

/// Confirmation body for deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// Result of a mark-read sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}
