//! Post service

use forum_core::entities::{NewPost, Post, User};
use forum_core::error::DomainError;
use forum_core::value_objects::{PostId, TopicId};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{first_validation_message, CreatePostForm};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reply to a topic as `author`
    #[instrument(skip(self, author, form), fields(author_id = %author.id, topic_id = %form.topic_id))]
    pub async fn create(&self, author: &User, form: &CreatePostForm) -> ServiceResult<Post> {
        let form = form.normalized();
        form.validate()
            .map_err(|e| DomainError::ValidationError(first_validation_message(&e)))?;

        let post = self
            .ctx
            .post_repo()
            .create(&NewPost {
                topic_id: form.topic_id,
                author_id: author.id,
                content: form.message,
            })
            .await?;

        info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Delete one post, returning the topic it was under
    ///
    /// Returns `None` if the post doesn't exist. Only the post's author or an
    /// administrator may delete it.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, actor: &User, id: PostId) -> ServiceResult<Option<TopicId>> {
        let Some(post) = self.ctx.post_repo().find_by_id(id).await? else {
            debug!("Post already gone");
            return Ok(None);
        };

        if !actor.can_moderate(post.author_id) {
            return Err(DomainError::NotAuthor.into());
        }

        let topic_id = self.ctx.post_repo().delete(id).await?;

        info!("Post deleted");
        Ok(topic_id)
    }
}
