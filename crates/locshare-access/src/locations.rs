//! Location directory: registration (owner resolved by email) and lookups.

use std::sync::Arc;

use locshare_storage::{
    CreateLocationParams, Location, LocationId, LocationStore, Store, StoreError,
};

use crate::error::lookup;
use crate::{finish, AccessError, Missing, UserDirectory};

/// A location as submitted for registration: the owner is named by email.
#[derive(Clone, Debug)]
pub struct RegisterLocationRequest {
    pub name: String,
    pub address: String,
    pub owner_email: String,
}

pub struct LocationDirectory<S: Store> {
    store: Arc<S>,
    users: UserDirectory<S>,
}

impl<S: Store> Clone for LocationDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            users: self.users.clone(),
        }
    }
}

impl<S: Store> LocationDirectory<S> {
    pub fn new(store: Arc<S>, users: UserDirectory<S>) -> Self {
        Self { store, users }
    }

    /// Register a location. The owner email is resolved in the same
    /// transaction as the insert; an unknown owner stores nothing.
    pub async fn register(&self, request: RegisterLocationRequest) -> Result<Location, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = self.register_in(&mut txn, &request).await;
        let location = finish(txn, result).await?;

        tracing::info!(
            location_id = %location.id,
            address = %location.address,
            owner_id = %location.owner_id,
            "location registered"
        );
        Ok(location)
    }

    async fn register_in(
        &self,
        txn: &mut S::Txn,
        request: &RegisterLocationRequest,
    ) -> Result<Location, AccessError> {
        let owner = self.users.resolve(txn, &request.owner_email).await?;

        txn.create_location(&CreateLocationParams {
            name: request.name.clone(),
            address: request.address.clone(),
            owner_id: owner.id,
        })
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                AccessError::AlreadyExists(format!("location with address {}", request.address))
            }
            other => AccessError::Store(other),
        })
    }

    pub async fn find_by_address(&self, address: &str) -> Result<Location, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = self.resolve(&mut txn, address).await;
        finish(txn, result).await
    }

    pub async fn find_by_id(&self, location_id: LocationId) -> Result<Location, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn
            .get_location(&location_id)
            .await
            .map_err(lookup(Missing::LocationId(location_id)));
        finish(txn, result).await
    }

    pub async fn exists_by_address(&self, address: &str) -> Result<bool, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn
            .location_exists_by_address(address)
            .await
            .map_err(Into::into);
        finish(txn, result).await
    }

    pub async fn find_all(&self) -> Result<Vec<Location>, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn.list_locations().await.map_err(Into::into);
        finish(txn, result).await
    }

    /// Resolve an address to the stored location, inside the caller's transaction.
    pub async fn resolve(&self, txn: &mut S::Txn, address: &str) -> Result<Location, AccessError> {
        txn.get_location_by_address(address)
            .await
            .map_err(lookup(Missing::LocationAddress(address.to_string())))
    }
}
