//! Repository functions for the domain layer.

pub mod posts;
pub mod users;
