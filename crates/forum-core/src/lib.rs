//! # forum-core
//!
//! Domain layer containing entities, typed ids, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Author, NewPost, NewTopic, NewUser, Post, PostWithAuthor, Topic, TopicWithAuthor, User};
pub use error::DomainError;
pub use traits::{PostRepository, RepoResult, TopicRepository, UserRepository};
pub use value_objects::{IdParseError, PostId, TopicId, UserId};
