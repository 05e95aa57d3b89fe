//! View DTOs rendered into templates, plus the JSON health responses

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Views
// ============================================================================

/// The logged-in user, as shown in the page header
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub member: bool,
    pub admin: bool,
}

/// Author line next to a topic or post
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub member: bool,
}

// ============================================================================
// Topic & Post Views
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TopicView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: AuthorView,
    pub created_at: String,
    /// Whether the viewer may delete this topic
    pub can_delete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i64,
    pub topic_id: i64,
    pub content: String,
    pub author: AuthorView,
    pub created_at: String,
    pub can_delete: bool,
}

/// A topic with its replies, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    pub topic: TopicView,
    pub posts: Vec<PostView>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
