//! Topic service
//!
//! Topic listing, creation, deletion and the thread view.

use forum_core::entities::{NewTopic, Topic, User};
use forum_core::error::DomainError;
use forum_core::value_objects::TopicId;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{first_validation_message, CreateTopicForm, ThreadView, TopicView};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Topic service
pub struct TopicService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TopicService<'a> {
    /// Create a new TopicService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All topics with their authors, newest first
    #[instrument(skip(self, viewer))]
    pub async fn list(&self, viewer: Option<&User>) -> ServiceResult<Vec<TopicView>> {
        let topics = self.ctx.topic_repo().list_with_authors().await?;
        Ok(topics.iter().map(|t| TopicView::new(t, viewer)).collect())
    }

    /// Create a topic authored by `author`
    #[instrument(skip(self, author, form), fields(author_id = %author.id))]
    pub async fn create(&self, author: &User, form: &CreateTopicForm) -> ServiceResult<Topic> {
        let form = form.normalized();
        form.validate()
            .map_err(|e| DomainError::ValidationError(first_validation_message(&e)))?;

        let topic = self
            .ctx
            .topic_repo()
            .create(&NewTopic::new(form.title, form.content, author.id))
            .await?;

        info!(topic_id = %topic.id, "Topic created");
        Ok(topic)
    }

    /// Delete a topic and all of its posts
    ///
    /// Only the topic's author or an administrator may delete it.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, actor: &User, id: TopicId) -> ServiceResult<u64> {
        let topic = self
            .ctx
            .topic_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TopicNotFound(id))?;

        if !actor.can_moderate(topic.author_id) {
            return Err(DomainError::NotAuthor.into());
        }

        let removed = self.ctx.topic_repo().delete_cascade(id).await?;

        info!(posts_removed = removed, "Topic deleted");
        Ok(removed)
    }

    /// A topic with its posts, or `None` if the topic doesn't exist
    #[instrument(skip(self, viewer))]
    pub async fn thread(&self, viewer: Option<&User>, id: TopicId) -> ServiceResult<Option<ThreadView>> {
        let (topic, posts) = tokio::try_join!(
            self.ctx.topic_repo().find_with_author(id),
            self.ctx.post_repo().find_by_topic(id),
        )?;

        Ok(topic.map(|topic| ThreadView::new(&topic, &posts, viewer)))
    }
}
