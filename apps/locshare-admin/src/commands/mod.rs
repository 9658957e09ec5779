pub mod grant;
pub mod location;
pub mod user;

pub use grant::{
    cmd_friends, cmd_grant_add, cmd_grant_list, cmd_grant_show, cmd_grant_update, cmd_share,
    cmd_shared,
};
pub use location::{cmd_location_add, cmd_location_list, cmd_location_show};
pub use user::{cmd_user_add, cmd_user_list, cmd_user_show};

use serde::Serialize;

/// Print a record as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
