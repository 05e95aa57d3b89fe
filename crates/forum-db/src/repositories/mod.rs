//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod post;
mod topic;
mod user;

pub use post::PgPostRepository;
pub use topic::PgTopicRepository;
pub use user::PgUserRepository;
