//! Topic database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the topics table
#[derive(Debug, Clone, FromRow)]
pub struct TopicModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A topic row joined with its author's public columns
#[derive(Debug, Clone, FromRow)]
pub struct TopicWithAuthorModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_is_member: bool,
}
