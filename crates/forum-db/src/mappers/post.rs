//! Post model -> entity mappers

use forum_core::entities::{Author, Post, PostWithAuthor};
use forum_core::value_objects::{PostId, TopicId, UserId};

use crate::models::{PostModel, PostWithAuthorModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::new(model.id),
            topic_id: TopicId::new(model.topic_id),
            author_id: UserId::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl From<PostWithAuthorModel> for PostWithAuthor {
    fn from(model: PostWithAuthorModel) -> Self {
        PostWithAuthor {
            post: Post {
                id: PostId::new(model.id),
                topic_id: TopicId::new(model.topic_id),
                author_id: UserId::new(model.author_id),
                content: model.content,
                created_at: model.created_at,
            },
            author: Author {
                id: UserId::new(model.author_id),
                username: model.author_username,
                first_name: model.author_first_name,
                last_name: model.author_last_name,
                member: model.author_is_member,
            },
        }
    }
}
