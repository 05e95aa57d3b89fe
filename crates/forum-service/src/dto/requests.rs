//! Form DTOs for submitted pages
//!
//! All form DTOs implement `Deserialize` (urlencoded bodies) and `Validate`.

use forum_core::entities::NewUser;
use forum_core::value_objects::TopicId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

// ============================================================================
// Auth Forms
// ============================================================================

/// Sign-up form
///
/// Serializes back into the template so a rejected form keeps its input.
/// The passwords are never echoed.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SignUpForm {
    #[validate(
        length(min = 1, max = 32, message = "Username must be 1-32 characters"),
        custom(function = "no_nul")
    )]
    pub username: String,

    #[serde(default, skip_serializing)]
    #[validate(
        length(min = 1, max = 128, message = "Password must be 1-128 characters"),
        custom(function = "no_nul")
    )]
    pub password: String,

    #[serde(default, skip_serializing)]
    pub confirm_password: String,

    #[serde(default)]
    #[validate(
        length(max = 64, message = "First name must be at most 64 characters"),
        custom(function = "no_nul")
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(
        length(max = 64, message = "Last name must be at most 64 characters"),
        custom(function = "no_nul")
    )]
    pub last_name: String,
}

impl SignUpForm {
    /// Trim the free-text fields; passwords are taken as typed
    pub fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    /// Row data for the new user; blank names become NULL
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
        }
    }
}

/// Log-in form
///
/// Missing fields read as empty so a malformed submission fails like a wrong
/// password instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogInForm {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl LogInForm {
    /// Input PostgreSQL could never store, so no account can match it
    pub fn is_unmatchable(&self) -> bool {
        has_nul(&self.username) || has_nul(&self.password)
    }
}

/// Membership upgrade form
#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeForm {
    #[serde(default)]
    pub passcode: String,
}

// ============================================================================
// Topic Forms
// ============================================================================

/// Create topic form
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateTopicForm {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "no_nul")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "no_nul")
    )]
    pub content: String,
}

impl CreateTopicForm {
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

// ============================================================================
// Post Forms
// ============================================================================

/// Create post form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostForm {
    pub topic_id: TopicId,

    #[validate(
        length(min = 1, max = 10000, message = "Message must be 1-10000 characters"),
        custom(function = "no_nul")
    )]
    pub message: String,
}

impl CreatePostForm {
    pub fn normalized(&self) -> Self {
        Self {
            topic_id: self.topic_id,
            message: self.message.trim().to_string(),
        }
    }
}

/// Delete post form; the topic id only picks the redirect when the post is gone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeletePostForm {
    #[serde(default)]
    pub topic_id: Option<String>,
}

impl DeletePostForm {
    pub fn topic_id(&self) -> Option<TopicId> {
        self.topic_id
            .as_deref()
            .and_then(|raw| TopicId::parse(raw).ok())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick one message to show from a set of field errors
///
/// Fields are visited in name order so the same input always yields the
/// same message.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("Invalid {field}"), ToString::to_string)
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

fn has_nul(value: &str) -> bool {
    value.contains('\0')
}

/// PostgreSQL text columns cannot hold NUL bytes
fn no_nul(value: &str) -> Result<(), ValidationError> {
    if has_nul(value) {
        Err(ValidationError::new("nul").with_message("Text must not contain NUL characters".into()))
    } else {
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
