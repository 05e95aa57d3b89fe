//! # forum-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, MembershipService, PostService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, TopicService,
};
