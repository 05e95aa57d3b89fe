//! Service context - dependency container for services
//!
//! Holds all repositories and other dependencies needed by services.

use std::sync::Arc;

use forum_common::{AppError, PasswordService, SharedSecret};
use forum_core::traits::{PostRepository, TopicRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The password hasher
/// - The membership upgrade secret
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    topic_repo: Arc<dyn TopicRepository>,
    post_repo: Arc<dyn PostRepository>,

    // Services
    password_service: Arc<PasswordService>,
    upgrade_secret: SharedSecret,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        topic_repo: Arc<dyn TopicRepository>,
        post_repo: Arc<dyn PostRepository>,
        password_service: Arc<PasswordService>,
        upgrade_secret: SharedSecret,
    ) -> Self {
        Self {
            user_repo,
            topic_repo,
            post_repo,
            password_service,
            upgrade_secret,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the topic repository
    pub fn topic_repo(&self) -> &dyn TopicRepository {
        self.topic_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    // === Services ===

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }

    /// Get the membership upgrade secret
    pub fn upgrade_secret(&self) -> &SharedSecret {
        &self.upgrade_secret
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("password_service", &self.password_service)
            .field("upgrade_secret", &self.upgrade_secret)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    topic_repo: Option<Arc<dyn TopicRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    password_service: Option<Arc<PasswordService>>,
    upgrade_secret: Option<SharedSecret>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn topic_repo(mut self, repo: Arc<dyn TopicRepository>) -> Self {
        self.topic_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn upgrade_secret(mut self, secret: SharedSecret) -> Self {
        self.upgrade_secret = Some(secret);
        self
    }

    /// Build the ServiceContext
    ///
    /// The password service defaults to Argon2id with default parameters.
    ///
    /// # Errors
    /// Returns `AppError::Config` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| missing("user_repo"))?,
            self.topic_repo.ok_or_else(|| missing("topic_repo"))?,
            self.post_repo.ok_or_else(|| missing("post_repo"))?,
            self.password_service.unwrap_or_default(),
            self.upgrade_secret.ok_or_else(|| missing("upgrade_secret"))?,
        ))
    }
}

fn missing(dependency: &str) -> ServiceError {
    AppError::Config(format!("{dependency} is required")).into()
}
