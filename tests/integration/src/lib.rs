//! Integration test utilities for the forum server
//!
//! This crate provides helpers for running end-to-end tests against the
//! rendered pages, driving them like a browser would.


pub use fixtures::*;
pub use helpers::*;
