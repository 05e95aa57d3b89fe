//! Domain entities - core business objects

mod post;
mod topic;
mod user;

pub use post::{NewPost, Post, PostWithAuthor};
pub use topic::{NewTopic, Topic, TopicWithAuthor};
pub use user::{Author, NewUser, User};
