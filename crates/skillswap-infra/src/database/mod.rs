//! Database access: connection setup, SeaORM entities and repositories.

mod connections;
pub mod entity;
mod postgres_base;
mod postgres_repo;

#[cfg(test)]
mod tests;

pub use connections::{DatabaseConfig, connect};
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{
    PostgresMessageRepository, PostgresPostRepository, PostgresSkillRepository,
    PostgresUserRepository,
};
