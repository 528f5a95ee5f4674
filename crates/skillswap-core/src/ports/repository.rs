use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Message, Post, Skill, User, UserSkills};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when the
    /// id does not resolve.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with profile-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// All users, newest first.
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    /// Users whose id appears in `ids` (order unspecified).
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// The user's two skill-reference sets.
    async fn skills_of(&self, user_id: Uuid) -> Result<UserSkills, RepoError>;

    /// Replace both skill-reference sets of a user.
    async fn set_skills(
        &self,
        user_id: Uuid,
        to_share: &[Uuid],
        to_learn: &[Uuid],
    ) -> Result<(), RepoError>;
}

/// Post repository, including the like-set.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// The set of user ids who have liked the post.
    async fn likes_of(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Flip `user_id`'s membership in the post's like-set and return the
    /// resulting set.
    ///
    /// Implementations must express the flip as an atomic row delete/insert,
    /// not a fetch-then-save of the whole set, so that concurrent toggles by
    /// different users both persist.
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;
}

/// Append-only message repository.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to the log.
    async fn append(&self, message: Message) -> Result<Message, RepoError>;

    /// All messages between the pair, in either direction, oldest first.
    async fn list_between(&self, user_a: Uuid, user_b: Uuid) -> Result<Vec<Message>, RepoError>;

    /// All messages where `user_id` is sender or receiver, newest first.
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Message>, RepoError>;

    /// Mark every message from `sender_id` to `receiver_id` as read.
    /// Returns the number of messages updated.
    async fn mark_read(&self, receiver_id: Uuid, sender_id: Uuid) -> Result<u64, RepoError>;
}

/// Skill repository.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Skill>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Skill>, RepoError>;

    async fn insert(&self, skill: Skill) -> Result<Skill, RepoError>;
}
