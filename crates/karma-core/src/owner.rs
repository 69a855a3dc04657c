//! Directive owners: users and actors.
//!
//! User directives follow a person across every token they control; actor
//! directives stick to one sheet no matter who rolls for it. The engine
//! checks the actor list first, then the user list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether a directive owner is a user account or an actor sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    /// A player or gamemaster account.
    User,
    /// A character sheet or token.
    Actor,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Actor => write!(f, "actor"),
        }
    }
}

/// Identifies a directive owner, rendered as `kind:id` (e.g. `user:alice`).
///
/// Serializes as that string so owners can key JSON maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct OwnerId {
    /// Whether this owner is a user or an actor.
    pub kind: OwnerKind,
    /// Host-assigned identifier for the owner.
    pub id: String,
}

impl OwnerId {
    /// An owner on the user list.
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            kind: OwnerKind::User,
            id: id.into(),
        }
    }

    /// An owner on the actor list.
    pub fn actor(id: impl Into<String>) -> Self {
        Self {
            kind: OwnerKind::Actor,
            id: id.into(),
        }
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for OwnerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| CoreError::InvalidOwner(s.to_string()))?;
        if id.is_empty() {
            return Err(CoreError::InvalidOwner(s.to_string()));
        }
        match kind {
            "user" => Ok(Self::user(id)),
            "actor" => Ok(Self::actor(id)),
            _ => Err(CoreError::InvalidOwner(s.to_string())),
        }
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.to_string()
    }
}

impl TryFrom<String> for OwnerId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_round_trip() {
        let owner = OwnerId::user("alice");
        assert_eq!(owner.to_string(), "user:alice");
        assert_eq!("user:alice".parse::<OwnerId>().unwrap(), owner);

        let actor = OwnerId::actor("goblin-3");
        assert_eq!(actor.to_string(), "actor:goblin-3");
        assert_eq!("actor:goblin-3".parse::<OwnerId>().unwrap(), actor);
    }

    #[test]
    fn parse_rejects_malformed_owners() {
        assert!("alice".parse::<OwnerId>().is_err());
        assert!("token:alice".parse::<OwnerId>().is_err());
        assert!("user:".parse::<OwnerId>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let owner = OwnerId::actor("bandit-7");
        let json = serde_json::to_string(&owner).unwrap();
        assert_eq!(json, "\"actor:bandit-7\"");
        let back: OwnerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, owner);
    }
}
