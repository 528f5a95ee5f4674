//! Application state - shared across all handlers.

use std::sync::Arc;

use skillswap_core::ports::{MessageRepository, PostRepository, SkillRepository, UserRepository};
use skillswap_infra::database::DatabaseConfig;
use skillswap_infra::{
    InMemoryMessageRepository, InMemoryPostRepository, InMemorySkillRepository,
    InMemoryUserRepository, PostgresMessageRepository, PostgresPostRepository,
    PostgresSkillRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub skills: Arc<dyn SkillRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        if let Some(config) = db_config {
            match skillswap_infra::connect(config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        messages: Arc::new(PostgresMessageRepository::new(conn.clone())),
                        skills: Arc::new(PostgresSkillRepository::new(conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running with in-memory repositories.");
        }

        Self::in_memory()
    }

    /// State backed entirely by in-memory repositories. All data is lost on
    /// process exit.
    pub fn in_memory() -> Self {
        let skills = Arc::new(InMemorySkillRepository::new());
        Self {
            users: Arc::new(InMemoryUserRepository::new(skills.clone())),
            posts: Arc::new(InMemoryPostRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
            skills,
        }
    }
}
