//! Participant identities and the ledger keys derived from them.
//!
//! A participant is either a registered member (stable account id) or a
//! guest: a display name scoped to one group with no account behind it.
//! Both are valid ledger parties. Guests are keyed by a namespaced form of
//! their name (`guest:<name>`) so a guest can never share a balance entry
//! with a member, even when the guest's name equals a member's id string.
//!
//! Known limitation: two distinct guests with the same name in the same
//! group resolve to the same key and therefore share one balance.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const GUEST_PREFIX: &str = "guest:";

/// Typed identity of a ledger party.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Participant {
    Member(Uuid),
    Guest { group_id: Uuid, name: String },
}

impl Participant {
    pub fn member(id: Uuid) -> Self {
        Participant::Member(id)
    }

    pub fn guest(group_id: Uuid, name: impl Into<String>) -> Self {
        Participant::Guest {
            group_id,
            name: name.into(),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Participant::Guest { .. })
    }

    /// Ledger key for this identity. The group scope of a guest is dropped
    /// because every ledger computation runs over a single group.
    pub fn key(&self) -> ParticipantKey {
        match self {
            Participant::Member(id) => ParticipantKey::Member(*id),
            Participant::Guest { name, .. } => ParticipantKey::Guest(name.clone()),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Member(id) => write!(f, "{id}"),
            Participant::Guest { name, .. } => write!(f, "{name} (guest)"),
        }
    }
}

/// Key of one entry in a [`Balances`](crate::Balances) map.
///
/// Serialized as a plain string (`<uuid>` or `guest:<name>`) so balance
/// maps render as JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ParticipantKey {
    Member(Uuid),
    Guest(String),
}

impl ParticipantKey {
    pub fn is_guest(&self) -> bool {
        matches!(self, ParticipantKey::Guest(_))
    }

    /// Human-readable label that needs no further lookups for guests.
    /// Members render as their id; callers resolve display names upstream.
    pub fn label(&self) -> String {
        match self {
            ParticipantKey::Member(id) => id.to_string(),
            ParticipantKey::Guest(name) => name.clone(),
        }
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantKey::Member(id) => write!(f, "{id}"),
            ParticipantKey::Guest(name) => write!(f, "{GUEST_PREFIX}{name}"),
        }
    }
}

/// Errors raised when parsing a textual participant key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantKeyError {
    EmptyGuestName,
    InvalidMemberId(String),
}

impl fmt::Display for ParticipantKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantKeyError::EmptyGuestName => f.write_str("guest key has an empty name"),
            ParticipantKeyError::InvalidMemberId(raw) => {
                write!(f, "`{raw}` is neither a member id nor a guest key")
            }
        }
    }
}

impl std::error::Error for ParticipantKeyError {}

impl FromStr for ParticipantKey {
    type Err = ParticipantKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(name) = value.strip_prefix(GUEST_PREFIX) {
            if name.trim().is_empty() {
                return Err(ParticipantKeyError::EmptyGuestName);
            }
            return Ok(ParticipantKey::Guest(name.to_string()));
        }
        Uuid::parse_str(value.trim())
            .map(ParticipantKey::Member)
            .map_err(|_| ParticipantKeyError::InvalidMemberId(value.to_string()))
    }
}

impl From<ParticipantKey> for String {
    fn from(key: ParticipantKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ParticipantKey {
    type Error = ParticipantKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raw identity columns as the persistence layer supplies them.
///
/// A row with `user_id` is a member; otherwise a non-blank `guest_name`
/// is a guest; anything else is malformed and ignored by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
}

impl ParticipantRef {
    pub fn member(id: Uuid) -> Self {
        Self {
            user_id: Some(id),
            guest_name: None,
        }
    }

    pub fn guest(name: impl Into<String>) -> Self {
        Self {
            user_id: None,
            guest_name: Some(name.into()),
        }
    }

    pub fn key(&self) -> Option<ParticipantKey> {
        if let Some(id) = self.user_id {
            return Some(ParticipantKey::Member(id));
        }
        self.guest_name
            .as_ref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| ParticipantKey::Guest(name.clone()))
    }

    /// Resolves the typed identity, scoping guests to `group_id`.
    pub fn resolve(&self, group_id: Uuid) -> Option<Participant> {
        self.key().map(|key| match key {
            ParticipantKey::Member(id) => Participant::Member(id),
            ParticipantKey::Guest(name) => Participant::Guest { group_id, name },
        })
    }
}

impl From<&Participant> for ParticipantRef {
    fn from(participant: &Participant) -> Self {
        match participant {
            Participant::Member(id) => ParticipantRef::member(*id),
            Participant::Guest { name, .. } => ParticipantRef::guest(name.clone()),
        }
    }
}

impl From<&ParticipantKey> for ParticipantRef {
    fn from(key: &ParticipantKey) -> Self {
        match key {
            ParticipantKey::Member(id) => ParticipantRef::member(*id),
            ParticipantKey::Guest(name) => ParticipantRef::guest(name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_key_is_namespaced() {
        let key = ParticipantRef::guest("Dana").key().expect("guest key");
        assert_eq!(key.to_string(), "guest:Dana");
        assert!(key.is_guest());
        assert_eq!(key.label(), "Dana");
    }

    #[test]
    fn member_id_wins_over_guest_name() {
        let id = Uuid::from_u128(7);
        let row = ParticipantRef {
            user_id: Some(id),
            guest_name: Some("Dana".into()),
        };
        assert_eq!(row.key(), Some(ParticipantKey::Member(id)));
    }

    #[test]
    fn blank_rows_have_no_key() {
        assert_eq!(ParticipantRef::default().key(), None);
        assert_eq!(ParticipantRef::guest("   ").key(), None);
    }

    #[test]
    fn keys_parse_from_their_display_form() {
        let id = Uuid::from_u128(42);
        let member: ParticipantKey = id.to_string().parse().expect("member key");
        assert_eq!(member, ParticipantKey::Member(id));

        let guest: ParticipantKey = "guest:Sam".parse().expect("guest key");
        assert_eq!(guest, ParticipantKey::Guest("Sam".into()));

        assert_eq!(
            "guest:".parse::<ParticipantKey>(),
            Err(ParticipantKeyError::EmptyGuestName)
        );
        assert!("alice".parse::<ParticipantKey>().is_err());
    }

    #[test]
    fn guest_named_like_a_member_id_stays_distinct() {
        let id = Uuid::from_u128(9);
        let member = ParticipantKey::Member(id);
        let guest = ParticipantRef::guest(id.to_string()).key().expect("guest key");
        assert_ne!(member, guest);
        assert_ne!(member.to_string(), guest.to_string());
    }

    #[test]
    fn resolve_scopes_guests_to_the_group() {
        let group = Uuid::from_u128(1);
        let participant = ParticipantRef::guest("Kim").resolve(group).expect("guest");
        assert_eq!(participant, Participant::guest(group, "Kim"));
        assert_eq!(participant.key(), ParticipantKey::Guest("Kim".into()));
        assert_eq!(ParticipantRef::from(&participant), ParticipantRef::guest("Kim"));
    }
}
