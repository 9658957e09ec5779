//! Storage abstraction for locshare.
//!
//! Backend crates (e.g., locshare-store-sqlite) implement these traits so
//! `locshare-access` doesn't depend on any specific database engine or schema details.

mod store;
mod types;

pub use store::*;
pub use types::*;

use thiserror::Error;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    /// Backend that persists nothing; only checks the traits compose.
    struct NoopStore;
    struct NoopTxn;

    #[async_trait::async_trait]
    impl UserStore for NoopTxn {
        async fn create_user(&mut self, params: &CreateUserParams) -> Result<User, StoreError> {
            Ok(User {
                id: UserId(1),
                email: params.email.clone(),
                name: params.name.clone(),
                created_at: Utc::now(),
            })
        }

        async fn get_user_by_email(&mut self, _email: &str) -> Result<User, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn get_user_by_id(&mut self, _user_id: &UserId) -> Result<User, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn user_exists_by_email(&mut self, _email: &str) -> Result<bool, StoreError> {
            Ok(false)
        }

        async fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
            Ok(vec![])
        }
    }

    #[async_trait::async_trait]
    impl LocationStore for NoopTxn {
        async fn create_location(
            &mut self,
            params: &CreateLocationParams,
        ) -> Result<Location, StoreError> {
            Ok(Location {
                id: LocationId(1),
                name: params.name.clone(),
                address: params.address.clone(),
                owner_id: params.owner_id,
                created_at: Utc::now(),
            })
        }

        async fn get_location(&mut self, _location_id: &LocationId) -> Result<Location, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn get_location_by_address(&mut self, _address: &str) -> Result<Location, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn location_exists_by_address(&mut self, _address: &str) -> Result<bool, StoreError> {
            Ok(false)
        }

        async fn list_locations(&mut self) -> Result<Vec<Location>, StoreError> {
            Ok(vec![])
        }
    }

    #[async_trait::async_trait]
    impl AccessGrantStore for NoopTxn {
        async fn save_grant(
            &mut self,
            _params: &SaveAccessGrantParams,
        ) -> Result<AccessGrant, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn get_grant(&mut self, _grant_id: &GrantId) -> Result<AccessGrant, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn get_grant_for(
            &mut self,
            _location_id: &LocationId,
            _user_id: &UserId,
        ) -> Result<AccessGrant, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn list_grants(&mut self) -> Result<Vec<AccessGrant>, StoreError> {
            Ok(vec![])
        }

        async fn list_grants_for_user(
            &mut self,
            _user_id: &UserId,
        ) -> Result<Vec<AccessGrant>, StoreError> {
            Ok(vec![])
        }

        async fn list_grants_for_location(
            &mut self,
            _location_id: &LocationId,
        ) -> Result<Vec<AccessGrant>, StoreError> {
            Ok(vec![])
        }
    }

    #[async_trait::async_trait]
    impl Transaction for NoopTxn {
        async fn commit(self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn rollback(self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl Store for NoopStore {
        type Txn = NoopTxn;

        async fn begin_txn(&self) -> Result<Self::Txn, StoreError> {
            Ok(NoopTxn)
        }
    }

    #[tokio::test]
    async fn trait_smoke() {
        let s = NoopStore;
        let mut txn = s.begin_txn().await.unwrap();

        let user = txn
            .create_user(&CreateUserParams {
                email: "test@example.com".to_string(),
                name: "Test".to_string(),
            })
            .await
            .unwrap();
        let location = txn
            .create_location(&CreateLocationParams {
                name: "home".to_string(),
                address: "1 Test Way".to_string(),
                owner_id: user.id,
            })
            .await
            .unwrap();
        assert_eq!(location.owner_id, user.id);

        let err = txn
            .get_grant_for(&location.id, &user.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
        assert!(txn.list_grants_for_user(&user.id).await.unwrap().is_empty());

        txn.commit().await.unwrap();
    }

    #[test]
    fn save_params_from_grant_targets_existing_row() {
        let now = Utc::now();
        let grant = AccessGrant {
            id: GrantId(9),
            user: User {
                id: UserId(2),
                email: "b@y.com".to_string(),
                name: "B".to_string(),
                created_at: now,
            },
            location: Location {
                id: LocationId(3),
                name: "office".to_string(),
                address: "5 Side St".to_string(),
                owner_id: UserId(1),
                created_at: now,
            },
            access_level: AccessLevel::View,
            created_at: now,
            updated_at: now,
        };

        let params = SaveAccessGrantParams::from(&grant);
        assert_eq!(params.id, Some(GrantId(9)));
        assert_eq!(params.user_id, UserId(2));
        assert_eq!(params.location_id, LocationId(3));

        let fresh = SaveAccessGrantParams::new(UserId(2), LocationId(3), AccessLevel::Admin);
        assert!(fresh.id.is_none());
    }

    #[test]
    fn store_error_display() {
        assert_eq!(StoreError::NotFound.to_string(), "not found");
        assert_eq!(
            StoreError::Backend("disk full".into()).to_string(),
            "backend error: disk full"
        );
    }
}
