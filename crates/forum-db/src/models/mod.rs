//! Database models - SQLx-compatible structs for PostgreSQL rows

mod post;
mod topic;
mod user;

pub use post::{PostModel, PostWithAuthorModel};
pub use topic::{TopicModel, TopicWithAuthorModel};
pub use user::UserModel;
