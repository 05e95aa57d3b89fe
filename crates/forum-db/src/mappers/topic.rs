//! Topic model -> entity mappers

use forum_core::entities::{Author, Topic, TopicWithAuthor};
use forum_core::value_objects::{TopicId, UserId};

use crate::models::{TopicModel, TopicWithAuthorModel};

impl From<TopicModel> for Topic {
    fn from(model: TopicModel) -> Self {
        Topic {
            id: TopicId::new(model.id),
            title: model.title,
            content: model.content,
            author_id: UserId::new(model.author_id),
            created_at: model.created_at,
        }
    }
}

impl From<TopicWithAuthorModel> for TopicWithAuthor {
    fn from(model: TopicWithAuthorModel) -> Self {
        let author = Author {
            id: UserId::new(model.author_id),
            username: model.author_username,
            first_name: model.author_first_name,
            last_name: model.author_last_name,
            member: model.author_is_member,
        };

        TopicWithAuthor {
            topic: Topic {
                id: TopicId::new(model.id),
                title: model.title,
                content: model.content,
                author_id: author.id,
                created_at: model.created_at,
            },
            author,
        }
    }
}
