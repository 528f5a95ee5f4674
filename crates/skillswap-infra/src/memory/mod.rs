//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured, and as the substrate
//! for handler tests. State lives in `tokio::sync::RwLock`-guarded maps and
//! is lost on process exit.

mod message;
mod post;
mod skill;
mod user;

pub use message::InMemoryMessageRepository;
pub use post::InMemoryPostRepository;
pub use skill::InMemorySkillRepository;
pub use user::InMemoryUserRepository;
