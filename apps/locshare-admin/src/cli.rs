use clap::{Parser, Subcommand};
use locshare_storage::AccessLevel;

#[derive(Parser)]
#[command(name = "locshare-admin")]
#[command(about = "Locshare administration CLI: users, locations and access grants")]
pub struct Cli {
    /// Database URL (sqlite://path/to/store.db)
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path to SQLite database file (alternative to --database-url)
    #[arg(long, global = true, env = "LOCSHARE_DB_PATH")]
    pub db: Option<String>,

    /// Connection pool size
    #[arg(long, global = true, env = "LOCSHARE_DB_MAX_CONNECTIONS")]
    pub max_connections: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// User commands
    User {
        #[command(subcommand)]
        user_cmd: UserCommand,
    },
    /// Location commands
    Location {
        #[command(subcommand)]
        location_cmd: LocationCommand,
    },
    /// Access grant commands
    Grant {
        #[command(subcommand)]
        grant_cmd: GrantCommand,
    },
    /// Share a location with a friend (requester must be an admin of it)
    Share {
        /// Address of the location to share
        #[arg(long)]
        address: String,
        /// Email of the user making the request
        #[arg(long)]
        by: String,
        /// Email of the friend receiving access
        #[arg(long)]
        friend: String,
        /// Access level to grant (view, edit, admin)
        #[arg(long, default_value = "view")]
        level: AccessLevel,
    },
    /// List users with access to a location (one entry per grant)
    Friends {
        /// Location address
        #[arg(long)]
        address: String,
    },
    /// List locations shared with a user
    Shared {
        /// User email
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a new user
    Add {
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
    },
    /// Show a user by email
    Show {
        #[arg(long)]
        email: String,
    },
    /// List all users
    List,
}

#[derive(Subcommand)]
pub enum LocationCommand {
    /// Register a new location owned by an existing user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        /// Owner email
        #[arg(long)]
        owner: String,
    },
    /// Show a location by address or id
    Show {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        address: Option<String>,
        #[arg(long)]
        id: Option<i64>,
    },
    /// List all locations
    List,
}

#[derive(Subcommand)]
pub enum GrantCommand {
    /// Record a grant for a user on a location
    Add {
        /// User email
        #[arg(long)]
        email: String,
        /// Location address
        #[arg(long)]
        address: String,
        /// Access level (view, edit, admin)
        #[arg(long)]
        level: AccessLevel,
    },
    /// Show a grant by id
    Show {
        #[arg(long)]
        id: i64,
    },
    /// List all grants
    List,
    /// Change the level of a user's grant on a location
    Update {
        /// User email
        #[arg(long)]
        email: String,
        /// Location address
        #[arg(long)]
        address: String,
        /// New access level (view, edit, admin)
        #[arg(long)]
        level: AccessLevel,
    },
}
