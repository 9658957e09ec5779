//! The access grant workflow: registering grants, sharing a location with a
//! friend (admins only), changing levels, and the shared-location / friend
//! projections.

use std::collections::HashSet;
use std::sync::Arc;

use locshare_storage::{
    AccessGrant, AccessGrantStore, AccessLevel, GrantId, Location, LocationId,
    SaveAccessGrantParams, Store, User,
};

use crate::error::lookup;
use crate::{finish, AccessError, DenialReason, LocationDirectory, Missing, UserDirectory};

/// A grant as submitted by a caller: user and location named by natural key.
#[derive(Clone, Debug)]
pub struct GrantRequest {
    pub user_email: String,
    pub location_address: String,
    pub access_level: AccessLevel,
}

pub struct LocationAccessService<S: Store> {
    store: Arc<S>,
    users: UserDirectory<S>,
    locations: LocationDirectory<S>,
}

impl<S: Store> Clone for LocationAccessService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            users: self.users.clone(),
            locations: self.locations.clone(),
        }
    }
}

impl<S: Store> LocationAccessService<S> {
    pub fn new(store: Arc<S>, users: UserDirectory<S>, locations: LocationDirectory<S>) -> Self {
        Self {
            store,
            users,
            locations,
        }
    }

    // ───────────────────────────── Writes ─────────────────────────────

    /// Resolve the request's email and address, then store the grant.
    /// Resolution and insert share one transaction.
    pub async fn register_grant(&self, request: GrantRequest) -> Result<AccessGrant, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = self.register_grant_in(&mut txn, &request).await;
        let grant = finish(txn, result).await?;

        tracing::info!(
            grant_id = %grant.id,
            user = %grant.user.email,
            address = %grant.location.address,
            level = %grant.access_level,
            "access grant registered"
        );
        Ok(grant)
    }

    async fn register_grant_in(
        &self,
        txn: &mut S::Txn,
        request: &GrantRequest,
    ) -> Result<AccessGrant, AccessError> {
        let user = self.users.resolve(txn, &request.user_email).await?;
        let location = self
            .locations
            .resolve(txn, &request.location_address)
            .await?;

        let grant = txn
            .save_grant(&SaveAccessGrantParams::new(
                user.id,
                location.id,
                request.access_level,
            ))
            .await?;
        Ok(grant)
    }

    /// Set the level of the grant `user` holds on `location_id`.
    ///
    /// The new level is written to the existing grant; no grant is created.
    pub async fn update_access_level(
        &self,
        location_id: LocationId,
        user: &User,
        access_level: AccessLevel,
    ) -> Result<AccessGrant, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = self
            .update_access_level_in(&mut txn, location_id, user, access_level)
            .await;
        let (previous, grant) = finish(txn, result).await?;

        tracing::info!(
            grant_id = %grant.id,
            location_id = %location_id,
            user = %user.email,
            from = %previous,
            to = %grant.access_level,
            "access level updated"
        );
        Ok(grant)
    }

    /// Returns the level the grant held before, and the updated grant.
    async fn update_access_level_in(
        &self,
        txn: &mut S::Txn,
        location_id: LocationId,
        user: &User,
        access_level: AccessLevel,
    ) -> Result<(AccessLevel, AccessGrant), AccessError> {
        let existing = txn
            .get_grant_for(&location_id, &user.id)
            .await
            .map_err(lookup(Missing::GrantFor {
                location_id,
                user_id: user.id,
            }))?;

        let mut params = SaveAccessGrantParams::from(&existing);
        params.access_level = access_level;
        let updated = txn.save_grant(&params).await?;
        Ok((existing.access_level, updated))
    }

    /// Share `location` with `friend_user` at `access_level`.
    ///
    /// The requester must hold an admin grant on the location; when they hold
    /// several, the highest level counts. A new grant is always inserted, even
    /// if the friend already holds one there.
    pub async fn add_friend_to_location(
        &self,
        location: &Location,
        requesting_user: &User,
        friend_user: &User,
        access_level: AccessLevel,
    ) -> Result<AccessGrant, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = self
            .add_friend_in(&mut txn, location, requesting_user, friend_user, access_level)
            .await;
        let grant = finish(txn, result).await?;

        tracing::info!(
            grant_id = %grant.id,
            location_id = %location.id,
            by = %requesting_user.email,
            friend = %friend_user.email,
            level = %access_level,
            "location shared"
        );
        Ok(grant)
    }

    async fn add_friend_in(
        &self,
        txn: &mut S::Txn,
        location: &Location,
        requesting_user: &User,
        friend_user: &User,
        access_level: AccessLevel,
    ) -> Result<AccessGrant, AccessError> {
        // A user may hold several grants on one location; the strongest decides.
        let requester_level = txn
            .list_grants_for_location(&location.id)
            .await?
            .into_iter()
            .filter(|grant| grant.user.id == requesting_user.id)
            .map(|grant| grant.access_level)
            .max();

        let Some(requester_level) = requester_level else {
            tracing::warn!(
                location_id = %location.id,
                user = %requesting_user.email,
                "share refused: requester has no grant"
            );
            return Err(AccessError::PermissionDenied(DenialReason::NoAccess));
        };

        if !requester_level.can_share() {
            tracing::warn!(
                location_id = %location.id,
                user = %requesting_user.email,
                level = %requester_level,
                "share refused: requester is not admin"
            );
            return Err(AccessError::PermissionDenied(DenialReason::RequiresAdmin));
        }

        // The requester's grant proves the location exists, so a dangling
        // reference here can only be the friend.
        txn.save_grant(&SaveAccessGrantParams::new(
            friend_user.id,
            location.id,
            access_level,
        ))
        .await
        .map_err(lookup(Missing::UserId(friend_user.id)))
    }

    // ───────────────────────────── Reads ─────────────────────────────

    pub async fn find_all(&self) -> Result<Vec<AccessGrant>, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn.list_grants().await.map_err(Into::into);
        finish(txn, result).await
    }

    pub async fn find_by_id(&self, grant_id: GrantId) -> Result<AccessGrant, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn
            .get_grant(&grant_id)
            .await
            .map_err(lookup(Missing::Grant(grant_id)));
        finish(txn, result).await
    }

    /// Locations `user` holds any grant on, each listed once, in grant order.
    pub async fn shared_locations(&self, user: &User) -> Result<Vec<Location>, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn.list_grants_for_user(&user.id).await.map_err(Into::into);
        let grants = finish(txn, result).await?;

        let mut seen = HashSet::new();
        let locations = grants
            .into_iter()
            .map(|grant| grant.location)
            .filter(|location| seen.insert(location.id))
            .collect();
        Ok(locations)
    }

    /// Users holding grants on the location, one entry per grant.
    pub async fn friends_with_access(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<User>, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn
            .list_grants_for_location(&location_id)
            .await
            .map_err(Into::into);
        let grants = finish(txn, result).await?;

        tracing::debug!(location_id = %location_id, grants = grants.len(), "friends listed");
        Ok(grants.into_iter().map(|grant| grant.user).collect())
    }
}
