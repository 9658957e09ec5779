//! Location types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LocationId, UserId};

/// Location record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String, // Unique, matched exactly
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a location.
///
/// The owner must already be resolved to a stored user.
#[derive(Clone, Debug)]
pub struct CreateLocationParams {
    pub name: String,
    pub address: String,
    pub owner_id: UserId,
}
