//! User directory: registration and lookups by email or id.

use std::sync::Arc;

use locshare_storage::{CreateUserParams, Store, StoreError, User, UserId, UserStore};

use crate::error::lookup;
use crate::{finish, AccessError, Missing};

pub struct UserDirectory<S: Store> {
    store: Arc<S>,
}

impl<S: Store> Clone for UserDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> UserDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user. Emails are unique.
    pub async fn register(&self, params: CreateUserParams) -> Result<User, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn.create_user(&params).await.map_err(|e| match e {
            StoreError::AlreadyExists => {
                AccessError::AlreadyExists(format!("user with email {}", params.email))
            }
            other => AccessError::Store(other),
        });
        let user = finish(txn, result).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = self.resolve(&mut txn, email).await;
        finish(txn, result).await
    }

    pub async fn find_by_id(&self, user_id: UserId) -> Result<User, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn
            .get_user_by_id(&user_id)
            .await
            .map_err(lookup(Missing::UserId(user_id)));
        finish(txn, result).await
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn.user_exists_by_email(email).await.map_err(Into::into);
        finish(txn, result).await
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AccessError> {
        let mut txn = self.store.begin_txn().await?;
        let result = txn.list_users().await.map_err(Into::into);
        finish(txn, result).await
    }

    /// Resolve an email to the stored user, inside the caller's transaction.
    pub async fn resolve(&self, txn: &mut S::Txn, email: &str) -> Result<User, AccessError> {
        txn.get_user_by_email(email)
            .await
            .map_err(lookup(Missing::UserEmail(email.to_string())))
    }
}
