//! Type definitions for locshare storage.

mod access_level;
mod grants;
mod ids;
mod locations;
mod users;

// Re-export all types from submodules
pub use access_level::*;
pub use grants::*;
pub use ids::*;
pub use locations::*;
pub use users::*;
