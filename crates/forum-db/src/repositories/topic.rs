//! PostgreSQL implementation of TopicRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use forum_core::entities::{NewTopic, Topic, TopicWithAuthor};
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, TopicRepository};
use forum_core::value_objects::TopicId;

use crate::models::{TopicModel, TopicWithAuthorModel};

use super::error::{map_db_error, map_foreign_key_violation, topic_not_found};

const SELECT_WITH_AUTHOR: &str = r"
    SELECT t.id, t.title, t.content, t.author_id, t.created_at,
           u.username AS author_username,
           u.first_name AS author_first_name,
           u.last_name AS author_last_name,
           u.is_member AS author_is_member
    FROM topics t
    JOIN users u ON u.id = t.author_id
";

/// PostgreSQL implementation of TopicRepository
#[derive(Clone)]
pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    /// Create a new PgTopicRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TopicId) -> RepoResult<Option<Topic>> {
        let result = sqlx::query_as::<_, TopicModel>(
            r"
            SELECT id, title, content, author_id, created_at
            FROM topics
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Topic::from))
    }

    #[instrument(skip(self))]
    async fn find_with_author(&self, id: TopicId) -> RepoResult<Option<TopicWithAuthor>> {
        let query = format!("{SELECT_WITH_AUTHOR} WHERE t.id = $1");
        let result = sqlx::query_as::<_, TopicWithAuthorModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(TopicWithAuthor::from))
    }

    #[instrument(skip(self))]
    async fn list_with_authors(&self) -> RepoResult<Vec<TopicWithAuthor>> {
        let query = format!("{SELECT_WITH_AUTHOR} ORDER BY t.created_at DESC, t.id DESC");
        let results = sqlx::query_as::<_, TopicWithAuthorModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(TopicWithAuthor::from).collect())
    }

    #[instrument(skip(self, topic), fields(author_id = %topic.author_id))]
    async fn create(&self, topic: &NewTopic) -> RepoResult<Topic> {
        let model = sqlx::query_as::<_, TopicModel>(
            r"
            INSERT INTO topics (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author_id, created_at
            ",
        )
        .bind(&topic.title)
        .bind(&topic.content)
        .bind(topic.author_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(topic.author_id)))?;

        Ok(Topic::from(model))
    }

    #[instrument(skip(self))]
    async fn delete_cascade(&self, id: TopicId) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the topic row; concurrent post inserts wait on the foreign key.
        let locked = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM topics WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            // Dropping the transaction rolls it back
            return Err(topic_not_found(id));
        }

        let posts = sqlx::query(
            r"
            DELETE FROM posts WHERE topic_id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            DELETE FROM topics WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(posts_removed = posts.rows_affected(), "Topic deleted");
        Ok(posts.rows_affected())
    }
}
