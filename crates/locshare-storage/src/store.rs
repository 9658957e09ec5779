//! The storage traits that backends implement.
//!
//! Every read and write happens on a [`Transaction`] obtained from
//! [`Store::begin_txn`]. A transaction that is dropped without [`Transaction::commit`]
//! must discard its writes.

use crate::types::*;
use crate::StoreError;

// ───────────────────────────────────── Users ──────────────────────────────────────────

#[async_trait::async_trait]
pub trait UserStore: Send {
    /// Create a new user (returns the stored record with its generated ID).
    async fn create_user(&mut self, params: &CreateUserParams) -> Result<User, StoreError>;

    /// Get user by email (exact match).
    async fn get_user_by_email(&mut self, email: &str) -> Result<User, StoreError>;

    /// Get user by ID.
    async fn get_user_by_id(&mut self, user_id: &UserId) -> Result<User, StoreError>;

    async fn user_exists_by_email(&mut self, email: &str) -> Result<bool, StoreError>;

    /// List all users, ordered by ID.
    async fn list_users(&mut self) -> Result<Vec<User>, StoreError>;
}

// ───────────────────────────────────── Locations ──────────────────────────────────────

#[async_trait::async_trait]
pub trait LocationStore: Send {
    /// Create a location owned by an already-stored user.
    async fn create_location(
        &mut self,
        params: &CreateLocationParams,
    ) -> Result<Location, StoreError>;

    /// Get location by ID.
    async fn get_location(&mut self, location_id: &LocationId) -> Result<Location, StoreError>;

    /// Get location by address (exact match).
    async fn get_location_by_address(&mut self, address: &str) -> Result<Location, StoreError>;

    async fn location_exists_by_address(&mut self, address: &str) -> Result<bool, StoreError>;

    /// List all locations, ordered by ID.
    async fn list_locations(&mut self) -> Result<Vec<Location>, StoreError>;
}

// ───────────────────────────────────── Access grants ──────────────────────────────────

/// The access grant ledger. Pure data access: no permission checks happen here.
///
/// Listings are ordered by grant ID (insertion order).
#[async_trait::async_trait]
pub trait AccessGrantStore: Send {
    /// Insert (`params.id == None`) or update a grant, returning the stored row.
    async fn save_grant(&mut self, params: &SaveAccessGrantParams)
        -> Result<AccessGrant, StoreError>;

    /// Get grant by ID.
    async fn get_grant(&mut self, grant_id: &GrantId) -> Result<AccessGrant, StoreError>;

    /// Get the grant a user holds on a location.
    /// If the pair has several grants, the oldest one is returned.
    async fn get_grant_for(
        &mut self,
        location_id: &LocationId,
        user_id: &UserId,
    ) -> Result<AccessGrant, StoreError>;

    async fn list_grants(&mut self) -> Result<Vec<AccessGrant>, StoreError>;

    /// List all grants held by a user.
    async fn list_grants_for_user(&mut self, user_id: &UserId)
        -> Result<Vec<AccessGrant>, StoreError>;

    /// List all grants on a location.
    async fn list_grants_for_location(
        &mut self,
        location_id: &LocationId,
    ) -> Result<Vec<AccessGrant>, StoreError>;
}

// ───────────────────────────────────── Lifecycle ──────────────────────────────────────

/// Explicit transaction: commit to keep writes, rollback (or drop) to discard them.
#[async_trait::async_trait]
pub trait Transaction: UserStore + LocationStore + AccessGrantStore + Sized {
    async fn commit(self) -> Result<(), StoreError>;
    async fn rollback(self) -> Result<(), StoreError>;
}

/// The storage trait `locshare-access` depends on.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    type Txn: Transaction;

    /// Open a new transaction.
    async fn begin_txn(&self) -> Result<Self::Txn, StoreError>;
}
