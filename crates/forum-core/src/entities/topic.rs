//! Topic entity - a discussion thread

use chrono::{DateTime, Utc};

use crate::value_objects::{TopicId, UserId};

use super::user::Author;

/// Topic entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// Check if the topic was written by the given user
    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Data needed to insert a new topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

impl NewTopic {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_id: UserId) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id,
        }
    }
}

/// Topic joined with its author, as listed on the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicWithAuthor {
    pub topic: Topic,
    pub author: Author,
}
