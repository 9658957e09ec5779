use locshare_access::GrantRequest;
use locshare_storage::{AccessLevel, GrantId};

use super::print_json;
use crate::Services;

pub async fn cmd_grant_add(
    services: &Services,
    email: &str,
    address: &str,
    level: AccessLevel,
) -> Result<(), Box<dyn std::error::Error>> {
    let grant = services
        .access
        .register_grant(GrantRequest {
            user_email: email.to_string(),
            location_address: address.to_string(),
            access_level: level,
        })
        .await?;
    print_json(&grant)
}

pub async fn cmd_grant_show(services: &Services, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let grant = services.access.find_by_id(GrantId(id)).await?;
    print_json(&grant)
}

pub async fn cmd_grant_list(services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let grants = services.access.find_all().await?;
    print_json(&grants)
}

pub async fn cmd_grant_update(
    services: &Services,
    email: &str,
    address: &str,
    level: AccessLevel,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = services.users.find_by_email(email).await?;
    let location = services.locations.find_by_address(address).await?;
    let grant = services
        .access
        .update_access_level(location.id, &user, level)
        .await?;
    print_json(&grant)
}

pub async fn cmd_share(
    services: &Services,
    address: &str,
    by: &str,
    friend: &str,
    level: AccessLevel,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = services.locations.find_by_address(address).await?;
    let requester = services.users.find_by_email(by).await?;
    let friend = services.users.find_by_email(friend).await?;

    let grant = services
        .access
        .add_friend_to_location(&location, &requester, &friend, level)
        .await?;
    print_json(&grant)
}

pub async fn cmd_friends(
    services: &Services,
    address: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = services.locations.find_by_address(address).await?;
    let friends = services.access.friends_with_access(location.id).await?;
    print_json(&friends)
}

pub async fn cmd_shared(services: &Services, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let user = services.users.find_by_email(email).await?;
    let locations = services.access.shared_locations(&user).await?;
    print_json(&locations)
}
