//! User entity - a registered forum account

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User entity
///
/// The password hash is deliberately not part of the entity; it is only
/// read by the credential check through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub member: bool,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full name if any part was given at sign-up, otherwise the username
    pub fn display_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
            .unwrap_or_else(|| self.username.clone())
    }

    /// Check if the user has been upgraded to a member
    #[inline]
    pub fn is_member(&self) -> bool {
        self.member
    }

    /// Check if the user is an administrator
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Whether this user may delete content written by `author_id`
    pub fn can_moderate(&self, author_id: UserId) -> bool {
        self.admin || self.id == author_id
    }

    /// Public projection shown next to topics and posts
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            member: self.member,
        }
    }
}

/// Data needed to insert a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// The author columns joined onto topics and posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub member: bool,
}

impl Author {
    pub fn display_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
            .unwrap_or_else(|| self.username.clone())
    }
}

fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
