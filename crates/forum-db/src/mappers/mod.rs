//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.
//! Inserts bind entity fields directly, so there are no insert structs.

mod post;
mod topic;
mod user;
