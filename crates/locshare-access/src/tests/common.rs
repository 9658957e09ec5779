//! Shared fixtures for service tests.

use std::sync::Arc;

use locshare_storage::{AccessLevel, CreateUserParams, Location, User};
use locshare_store_sqlite::SqliteStore;

use crate::{
    GrantRequest, LocationAccessService, LocationDirectory, RegisterLocationRequest, UserDirectory,
};

pub struct Services {
    pub users: UserDirectory<SqliteStore>,
    pub locations: LocationDirectory<SqliteStore>,
    pub access: LocationAccessService<SqliteStore>,
}

pub async fn create_test_services() -> Services {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let users = UserDirectory::new(store.clone());
    let locations = LocationDirectory::new(store.clone(), users.clone());
    let access = LocationAccessService::new(store, users.clone(), locations.clone());
    Services {
        users,
        locations,
        access,
    }
}

pub async fn create_test_user(services: &Services, email: &str) -> User {
    services
        .users
        .register(CreateUserParams {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
        })
        .await
        .unwrap()
}

pub async fn create_test_location(services: &Services, owner: &User, address: &str) -> Location {
    services
        .locations
        .register(RegisterLocationRequest {
            name: format!("{}'s place", owner.name),
            address: address.to_string(),
            owner_email: owner.email.clone(),
        })
        .await
        .unwrap()
}

pub async fn grant(services: &Services, user: &User, location: &Location, level: AccessLevel) {
    services
        .access
        .register_grant(GrantRequest {
            user_email: user.email.clone(),
            location_address: location.address.clone(),
            access_level: level,
        })
        .await
        .unwrap();
}
