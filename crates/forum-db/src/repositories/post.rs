//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{NewPost, Post, PostWithAuthor};
use forum_core::traits::{PostRepository, RepoResult};
use forum_core::value_objects::{PostId, TopicId};

use crate::models::{PostModel, PostWithAuthorModel};

use super::error::{map_db_error, map_foreign_key_violation, topic_not_found};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, topic_id, author_id, content, created_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_by_topic(&self, topic_id: TopicId) -> RepoResult<Vec<PostWithAuthor>> {
        let results = sqlx::query_as::<_, PostWithAuthorModel>(
            r"
            SELECT p.id, p.topic_id, p.author_id, p.content, p.created_at,
                   u.username AS author_username,
                   u.first_name AS author_first_name,
                   u.last_name AS author_last_name,
                   u.is_member AS author_is_member
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.topic_id = $1
            ORDER BY p.created_at ASC, p.id ASC
            ",
        )
        .bind(topic_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostWithAuthor::from).collect())
    }

    #[instrument(skip(self, post), fields(topic_id = %post.topic_id, author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let model = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO posts (topic_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, topic_id, author_id, content, created_at
            ",
        )
        .bind(post.topic_id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || topic_not_found(post.topic_id)))?;

        Ok(Post::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<Option<TopicId>> {
        let topic_id = sqlx::query_scalar::<_, i64>(
            r"
            DELETE FROM posts WHERE id = $1 RETURNING topic_id
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(topic_id.map(TopicId::new))
    }
}
