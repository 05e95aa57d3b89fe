//! Entity to view mappers
//!
//! Implements conversions from domain entities to view DTOs. Views that
//! carry a `can_delete` flag take the viewing user into account.

use forum_core::entities::{Author, PostWithAuthor, TopicWithAuthor, User};
use forum_core::value_objects::UserId;

use super::responses::{AuthorView, PostView, ThreadView, TopicView, UserView};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn viewer_can_delete(viewer: Option<&User>, author_id: UserId) -> bool {
    viewer.is_some_and(|user| user.can_moderate(author_id))
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            display_name: user.display_name(),
            member: user.member,
            admin: user.admin,
        }
    }
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.into_inner(),
            username: author.username.clone(),
            display_name: author.display_name(),
            member: author.member,
        }
    }
}

// ============================================================================
// Topic & Post Mappers
// ============================================================================

impl TopicView {
    pub fn new(item: &TopicWithAuthor, viewer: Option<&User>) -> Self {
        Self {
            id: item.topic.id.into_inner(),
            title: item.topic.title.clone(),
            content: item.topic.content.clone(),
            author: AuthorView::from(&item.author),
            created_at: item.topic.created_at.format(TIMESTAMP_FORMAT).to_string(),
            can_delete: viewer_can_delete(viewer, item.topic.author_id),
        }
    }
}

impl PostView {
    pub fn new(item: &PostWithAuthor, viewer: Option<&User>) -> Self {
        Self {
            id: item.post.id.into_inner(),
            topic_id: item.post.topic_id.into_inner(),
            content: item.post.content.clone(),
            author: AuthorView::from(&item.author),
            created_at: item.post.created_at.format(TIMESTAMP_FORMAT).to_string(),
            can_delete: viewer_can_delete(viewer, item.post.author_id),
        }
    }
}

impl ThreadView {
    pub fn new(topic: &TopicWithAuthor, posts: &[PostWithAuthor], viewer: Option<&User>) -> Self {
        Self {
            topic: TopicView::new(topic, viewer),
            posts: posts.iter().map(|p| PostView::new(p, viewer)).collect(),
        }
    }
}
