//! Post entity - a reply inside a topic thread

use chrono::{DateTime, Utc};

use crate::value_objects::{PostId, TopicId, UserId};

use super::user::Author;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub topic_id: TopicId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Check if the post was written by the given user
    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Get a truncated preview of the post (for log lines)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}

/// Data needed to insert a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub topic_id: TopicId,
    pub author_id: UserId,
    pub content: String,
}

/// Post joined with its author, as shown in a thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}
