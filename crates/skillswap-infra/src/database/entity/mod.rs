//! SeaORM entities and their conversions to/from domain types.

pub mod message;
pub mod post;
pub mod post_like;
pub mod skill;
pub mod user;
pub mod user_skill;
