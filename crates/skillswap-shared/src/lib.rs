//! # Skillswap Shared
//!
//! Wire types shared between the API server and its clients: request and
//! response DTOs plus the error body shape.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
