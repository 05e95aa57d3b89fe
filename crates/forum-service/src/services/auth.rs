//! Authentication service
//!
//! Handles user registration, credential checks, and session identity lookup.

use forum_core::entities::User;
use forum_core::error::DomainError;
use forum_core::value_objects::UserId;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{first_validation_message, LogInForm, SignUpForm};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// The new user is not logged in.
    #[instrument(skip(self, form), fields(username = %form.username.trim()))]
    pub async fn register(&self, form: &SignUpForm) -> ServiceResult<User> {
        let form = form.normalized();

        form.validate()
            .map_err(|e| DomainError::ValidationError(first_validation_message(&e)))?;

        if !form.passwords_match() {
            return Err(DomainError::PasswordMismatch.into());
        }

        let password_hash = self.ctx.password_service().hash(&form.password)?;

        // Duplicate usernames surface here as UsernameTaken from the unique constraint
        let user = self
            .ctx
            .user_repo()
            .create(&form.to_new_user(), &password_hash)
            .await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Check a username and password
    ///
    /// Unknown usernames and wrong passwords fail identically, with the same
    /// hashing cost.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn authenticate(&self, form: &LogInForm) -> ServiceResult<User> {
        let passwords = self.ctx.password_service();

        if form.is_unmatchable() {
            warn!("Login failed: NUL byte in credentials");
            return Err(passwords.verify_absent(&form.password).into());
        }

        let Some(user) = self
            .ctx
            .user_repo()
            .find_by_username(form.username.trim())
            .await?
        else {
            warn!("Login failed: user not found");
            return Err(passwords.verify_absent(&form.password).into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(passwords.verify_absent(&form.password).into());
        };

        if let Err(e) = passwords.verify_or_error(&form.password, &password_hash) {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in successfully");
        Ok(user)
    }

    /// Resolve the user a session points at
    ///
    /// `None` means the user no longer exists and the session should be dropped.
    #[instrument(skip(self))]
    pub async fn current_user(&self, id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.ctx.user_repo().find_by_id(id).await?)
    }
}
