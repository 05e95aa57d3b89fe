//! User model -> entity mapper

use forum_core::entities::User;
use forum_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            member: model.is_member,
            admin: model.is_admin,
            created_at: model.created_at,
        }
    }
}
