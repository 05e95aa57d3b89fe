//! Membership service

use forum_core::entities::User;
use forum_core::error::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::UpgradeForm;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Grants the membership flag to users who know the shared passcode
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upgrade `user` to a member if the passcode matches exactly
    #[instrument(skip(self, user, form), fields(user_id = %user.id))]
    pub async fn upgrade(&self, user: &User, form: &UpgradeForm) -> ServiceResult<()> {
        if !self.ctx.upgrade_secret().matches(&form.passcode) {
            warn!("Membership upgrade rejected");
            return Err(DomainError::UpgradeDenied.into());
        }

        self.ctx.user_repo().set_member(user.id, true).await?;

        info!("Membership upgraded");
        Ok(())
    }
}
