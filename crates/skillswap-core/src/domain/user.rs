use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a member of the skill-sharing community.
///
/// The password hash lives here for authentication but is never serialized
/// into API responses; response DTOs simply have no field for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            image: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The two skill-reference sets attached to a user profile.
#[derive(Debug, Clone, Default)]
pub struct UserSkills {
    pub to_share: Vec<super::Skill>,
    pub to_learn: Vec<super::Skill>,
}
