use locshare_access::RegisterLocationRequest;
use locshare_storage::LocationId;

use super::print_json;
use crate::Services;

pub async fn cmd_location_add(
    services: &Services,
    name: &str,
    address: &str,
    owner_email: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = services
        .locations
        .register(RegisterLocationRequest {
            name: name.to_string(),
            address: address.to_string(),
            owner_email: owner_email.to_string(),
        })
        .await?;
    print_json(&location)
}

pub async fn cmd_location_show(
    services: &Services,
    address: Option<&str>,
    id: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = match (address, id) {
        (Some(address), _) => services.locations.find_by_address(address).await?,
        (None, Some(id)) => services.locations.find_by_id(LocationId(id)).await?,
        (None, None) => return Err("either --address or --id is required".into()),
    };
    print_json(&location)
}

pub async fn cmd_location_list(services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let locations = services.locations.find_all().await?;
    print_json(&locations)
}
