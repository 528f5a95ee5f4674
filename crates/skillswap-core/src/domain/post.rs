use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a piece of shared content tied to a skill.
///
/// The author reference is immutable after creation. Likes are not stored on
/// the post itself: they are a set of user ids kept in their own table so
/// that like/unlike can be an atomic row insert/delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub skill_id: Uuid,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(author_id: Uuid, skill_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            skill_id,
            title,
            content,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
