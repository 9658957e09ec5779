mod cli;
mod commands;
mod config;

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, GrantCommand, LocationCommand, UserCommand};
use commands::*;
use config::StoreConfig;
use locshare_access::{LocationAccessService, LocationDirectory, UserDirectory};
use locshare_store_sqlite::SqliteStore;

/// The services every command works through, wired over one store.
pub struct Services {
    pub users: UserDirectory<SqliteStore>,
    pub locations: LocationDirectory<SqliteStore>,
    pub access: LocationAccessService<SqliteStore>,
}

impl Services {
    pub fn new(store: SqliteStore) -> Self {
        let store = Arc::new(store);
        let users = UserDirectory::new(store.clone());
        let locations = LocationDirectory::new(store.clone(), users.clone());
        let access = LocationAccessService::new(store, users.clone(), locations.clone());
        Self {
            users,
            locations,
            access,
        }
    }
}

async fn run(cli: Cli, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::User { user_cmd } => match user_cmd {
            UserCommand::Add { email, name } => cmd_user_add(services, &email, &name).await?,
            UserCommand::Show { email } => cmd_user_show(services, &email).await?,
            UserCommand::List => cmd_user_list(services).await?,
        },
        Command::Location { location_cmd } => match location_cmd {
            LocationCommand::Add {
                name,
                address,
                owner,
            } => cmd_location_add(services, &name, &address, &owner).await?,
            LocationCommand::Show { address, id } => {
                cmd_location_show(services, address.as_deref(), id).await?
            }
            LocationCommand::List => cmd_location_list(services).await?,
        },
        Command::Grant { grant_cmd } => match grant_cmd {
            GrantCommand::Add {
                email,
                address,
                level,
            } => cmd_grant_add(services, &email, &address, level).await?,
            GrantCommand::Show { id } => cmd_grant_show(services, id).await?,
            GrantCommand::List => cmd_grant_list(services).await?,
            GrantCommand::Update {
                email,
                address,
                level,
            } => cmd_grant_update(services, &email, &address, level).await?,
        },
        Command::Share {
            address,
            by,
            friend,
            level,
        } => cmd_share(services, &address, &by, &friend, level).await?,
        Command::Friends { address } => cmd_friends(services, &address).await?,
        Command::Shared { email } => cmd_shared(services, &email).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = StoreConfig::from_args(
        cli.database_url.as_deref(),
        cli.db.as_deref(),
        cli.max_connections.as_deref(),
    )?;
    tracing::debug!(?config, "opening store");

    let services = Services::new(config.open().await?);
    run(cli, &services).await
}
