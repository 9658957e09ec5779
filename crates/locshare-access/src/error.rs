//! Errors surfaced by the directories and the access workflow.

use locshare_storage::{GrantId, LocationId, StoreError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{0} not found")]
    NotFound(Missing),

    #[error("permission denied: {0}")]
    PermissionDenied(DenialReason),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    UserEmail(String),
    UserId(UserId),
    LocationAddress(String),
    LocationId(LocationId),
    Grant(GrantId),
    GrantFor {
        location_id: LocationId,
        user_id: UserId,
    },
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::UserEmail(email) => write!(f, "user with email {}", email),
            Missing::UserId(id) => write!(f, "user with ID {}", id),
            Missing::LocationAddress(address) => write!(f, "location with address {}", address),
            Missing::LocationId(id) => write!(f, "location with ID {}", id),
            Missing::Grant(id) => write!(f, "access grant with ID {}", id),
            Missing::GrantFor {
                location_id,
                user_id,
            } => write!(
                f,
                "access grant on location {} for user {}",
                location_id, user_id
            ),
        }
    }
}

/// Why a share request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenialReason {
    /// The requester holds no grant on the location.
    #[error("no access to this location")]
    NoAccess,
    /// The requester holds a grant below admin.
    #[error("requires admin access")]
    RequiresAdmin,
}

impl AccessError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::NotFound(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, AccessError::PermissionDenied(_))
    }
}

/// Turn a store lookup failure into `NotFound(missing)`; other failures pass through.
pub(crate) fn lookup(missing: Missing) -> impl FnOnce(StoreError) -> AccessError {
    move |e| match e {
        StoreError::NotFound => AccessError::NotFound(missing),
        other => AccessError::Store(other),
    }
}
