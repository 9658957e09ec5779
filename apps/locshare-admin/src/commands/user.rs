use locshare_storage::CreateUserParams;

use super::print_json;
use crate::Services;

pub async fn cmd_user_add(
    services: &Services,
    email: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = services
        .users
        .register(CreateUserParams {
            email: email.to_string(),
            name: name.to_string(),
        })
        .await?;
    print_json(&user)
}

pub async fn cmd_user_show(
    services: &Services,
    email: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = services.users.find_by_email(email).await?;
    print_json(&user)
}

pub async fn cmd_user_list(services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    let users = services.users.find_all().await?;
    print_json(&users)
}
