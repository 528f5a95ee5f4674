use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use skillswap_core::domain::Post;
use skillswap_core::error::RepoError;
use skillswap_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct PostState {
    posts: HashMap<Uuid, Post>,
    // Like-set per post, in like order. Distinctness is enforced by the
    // toggle itself.
    likes: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory post store.
#[derive(Default)]
pub struct InMemoryPostRepository {
    state: RwLock<PostState>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.state.write().await.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        state.likes.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let mut all: Vec<Post> = self.state.read().await.posts.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn likes_of(&self, post_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .likes
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        // Single write lock for the whole flip keeps it atomic.
        let mut state = self.state.write().await;
        let likes = state.likes.entry(post_id).or_default();

        if let Some(pos) = likes.iter().position(|id| *id == user_id) {
            likes.remove(pos);
        } else {
            likes.push(user_id);
        }

        Ok(likes.clone())
    }
}
