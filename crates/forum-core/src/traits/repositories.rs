//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewPost, NewTopic, NewUser, Post, PostWithAuthor, Topic, TopicWithAuthor, User};
use crate::error::DomainError;
use crate::value_objects::{PostId, TopicId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Create a new user and return the stored row
    ///
    /// Fails with `DomainError::UsernameTaken` when the unique constraint on
    /// `username` rejects the insert.
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Set or clear the membership flag
    async fn set_member(&self, id: UserId, member: bool) -> RepoResult<()>;
}

// ============================================================================
// Topic Repository
// ============================================================================

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Find topic by ID
    async fn find_by_id(&self, id: TopicId) -> RepoResult<Option<Topic>>;

    /// Find topic by ID joined with its author
    async fn find_with_author(&self, id: TopicId) -> RepoResult<Option<TopicWithAuthor>>;

    /// List every topic with its author, newest first
    async fn list_with_authors(&self) -> RepoResult<Vec<TopicWithAuthor>>;

    /// Create a new topic and return the stored row
    async fn create(&self, topic: &NewTopic) -> RepoResult<Topic>;

    /// Delete a topic and all of its posts in one transaction
    ///
    /// Returns the number of posts removed. Fails with
    /// `DomainError::TopicNotFound` (and removes nothing) if the topic does
    /// not exist.
    async fn delete_cascade(&self, id: TopicId) -> RepoResult<u64>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List the posts of a topic with their authors, oldest first
    async fn find_by_topic(&self, topic_id: TopicId) -> RepoResult<Vec<PostWithAuthor>>;

    /// Create a new post and return the stored row
    ///
    /// Fails with `DomainError::TopicNotFound` if the topic does not exist.
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Delete a single post, returning the topic it belonged to
    ///
    /// Returns `None` if no post had that id.
    async fn delete(&self, id: PostId) -> RepoResult<Option<TopicId>>;
}
