//! # Skillswap Infrastructure
//!
//! Concrete implementations of the ports defined in `skillswap-core`:
//! SeaORM/Postgres repositories, in-memory repositories (used as the
//! fallback when no database is configured, and as the substrate for
//! handler tests), JWT tokens and Argon2 password hashing.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresMessageRepository, PostgresPostRepository, PostgresSkillRepository,
    PostgresUserRepository, connect,
};
pub use memory::{
    InMemoryMessageRepository, InMemoryPostRepository, InMemorySkillRepository,
    InMemoryUserRepository,
};
