//! Data transfer objects for form submissions and rendered pages
//!
//! This module provides:
//! - Form DTOs with validation for submitted inputs
//! - View DTOs serialized into templates
//! - Mappers for converting domain entities to view DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    first_validation_message, CreatePostForm, CreateTopicForm, DeletePostForm, LogInForm,
    SignUpForm, UpgradeForm,
};
pub use responses::{
    AuthorView, HealthChecks, HealthResponse, PostView, ReadinessResponse, ThreadView, TopicView,
    UserView,
};
