//! Access grant types: one user, one location, one access level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccessLevel, GrantId, Location, LocationId, User, UserId};

/// Access grant record, with the referenced user and location materialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub id: GrantId,
    pub user: User,
    pub location: Location,
    pub access_level: AccessLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for saving an access grant.
///
/// `id: None` inserts a new row; `Some` updates that row in place. Nothing
/// prevents two rows for the same (user, location) pair.
#[derive(Clone, Debug)]
pub struct SaveAccessGrantParams {
    pub id: Option<GrantId>,
    pub user_id: UserId,
    pub location_id: LocationId,
    pub access_level: AccessLevel,
}

impl SaveAccessGrantParams {
    /// Parameters for inserting a fresh grant.
    pub fn new(user_id: UserId, location_id: LocationId, access_level: AccessLevel) -> Self {
        Self {
            id: None,
            user_id,
            location_id,
            access_level,
        }
    }
}

impl From<&AccessGrant> for SaveAccessGrantParams {
    fn from(grant: &AccessGrant) -> Self {
        Self {
            id: Some(grant.id),
            user_id: grant.user.id,
            location_id: grant.location.id,
            access_level: grant.access_level,
        }
    }
}
