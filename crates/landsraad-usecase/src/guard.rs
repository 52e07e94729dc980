//! Actor checks shared by the services

use landsraad_domain::model::actor::Actor;
use landsraad_domain::model::house::HouseId;
use tracing::warn;

use crate::error::{ServiceError, ServiceResult};

/// Only a game master may `action`
pub(crate) fn ensure_admin(actor: &Actor, action: &str) -> ServiceResult<()> {
    if actor.is_admin() {
        return Ok(());
    }
    warn!(actor = %actor, action, "Rejected: admin only");
    Err(ServiceError::Forbidden(format!("{} may not {}", actor, action)))
}

/// The owning house or a game master may `action`
pub(crate) fn ensure_owner_or_admin(actor: &Actor, owner: &HouseId, action: &str) -> ServiceResult<()> {
    if actor.is_admin() || actor.house() == Some(owner) {
        return Ok(());
    }
    warn!(actor = %actor, owner = %owner, action, "Rejected: not the owner");
    Err(ServiceError::Forbidden(format!(
        "{} may not {} for house {}",
        actor, action, owner
    )))
}
