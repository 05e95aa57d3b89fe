//! Schema bootstrap
//!
//! The forum has three tables and no migration history, so start-up runs an
//! idempotent batch of `CREATE ... IF NOT EXISTS` statements instead of a
//! migrator.

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use tracing::{debug, info};

/// Advisory lock key held while bootstrapping ("forumsch" as ASCII)
const BOOTSTRAP_LOCK_KEY: i64 = 0x666f_7275_6d73_6368;

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        username      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        first_name    TEXT,
        last_name     TEXT,
        is_member     BOOLEAN NOT NULL DEFAULT FALSE,
        is_admin      BOOLEAN NOT NULL DEFAULT FALSE,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS topics (
        id         BIGSERIAL PRIMARY KEY,
        title      TEXT NOT NULL,
        content    TEXT NOT NULL,
        author_id  BIGINT NOT NULL REFERENCES users (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS posts (
        id         BIGSERIAL PRIMARY KEY,
        topic_id   BIGINT NOT NULL REFERENCES topics (id),
        author_id  BIGINT NOT NULL REFERENCES users (id),
        content    TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    ",
    r"CREATE INDEX IF NOT EXISTS idx_topics_created_at ON topics (created_at DESC)",
    r"CREATE INDEX IF NOT EXISTS idx_posts_topic ON posts (topic_id, created_at)",
];

/// Create the forum tables if they don't exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!(statements = SCHEMA.len(), "Database schema ensured");
    Ok(())
}

/// A held session-level advisory lock serializing start-up DDL
///
/// `CREATE TABLE IF NOT EXISTS` is not safe against a concurrent identical
/// statement in PostgreSQL, so processes starting against the same database
/// take this lock around their bootstrap.
pub struct BootstrapLock {
    conn: PoolConnection<Postgres>,
}

/// Take the bootstrap lock, waiting for any other holder
pub async fn acquire_bootstrap_lock(pool: &PgPool) -> Result<BootstrapLock, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    // Closing the connection drops the lock even if `release` is never reached.
    conn.close_on_drop();
    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(BOOTSTRAP_LOCK_KEY)
        .execute(&mut *conn)
        .await?;
    debug!("Bootstrap lock acquired");
    Ok(BootstrapLock { conn })
}

impl BootstrapLock {
    /// Release the lock and return the connection to the pool
    pub async fn release(mut self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_unlock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *self.conn)
            .await?;
        debug!("Bootstrap lock released");
        Ok(())
    }
}
