//! Domain entities - the core business objects.

mod conversation;
mod message;
mod post;
mod skill;
mod user;

pub use conversation::{ConversationHead, aggregate_conversations};
pub use message::Message;
pub use post::Post;
pub use skill::Skill;
pub use user::{User, UserSkills};
