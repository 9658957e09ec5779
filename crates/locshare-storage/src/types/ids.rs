//! Strongly-typed identifiers (avoid mixing raw row ids arbitrarily).
//!
//! Ids are assigned by the store on insert.

use serde::{Deserialize, Serialize};

/// User identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Location identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub i64);

/// Access grant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for GrantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_bare_number() {
        assert_eq!(UserId(7).to_string(), "7");
        assert_eq!(LocationId(42).to_string(), "42");
        assert_eq!(GrantId(-1).to_string(), "-1");
    }

    #[test]
    fn test_ids_serialize_transparent() {
        assert_eq!(serde_json::to_string(&UserId(3)).unwrap(), "3");
        let id: LocationId = serde_json::from_str("11").unwrap();
        assert_eq!(id, LocationId(11));
    }

    #[test]
    fn test_ids_hash_by_value() {
        use std::collections::HashSet;
        let set: HashSet<GrantId> = [GrantId(1), GrantId(1), GrantId(2)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
