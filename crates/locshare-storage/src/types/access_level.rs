//! Access levels a grant can carry on a location.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Permission tier on a location, ordered by privilege (`View < Edit < Admin`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    View,
    Edit,
    Admin,
}

/// Error type for parsing AccessLevel from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAccessLevelError(pub String);

impl std::fmt::Display for ParseAccessLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid access level: {}", self.0)
    }
}

impl std::error::Error for ParseAccessLevelError {}

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(AccessLevel::View),
            "edit" => Ok(AccessLevel::Edit),
            "admin" => Ok(AccessLevel::Admin),
            _ => Err(ParseAccessLevelError(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::View => "view",
            AccessLevel::Edit => "edit",
            AccessLevel::Admin => "admin",
        }
    }

    /// Check if this level carries at least the privileges of another level
    pub fn includes(&self, other: &AccessLevel) -> bool {
        self >= other
    }

    /// Only admins may share a location with someone else.
    pub fn can_share(&self) -> bool {
        self.includes(&AccessLevel::Admin)
    }
}
