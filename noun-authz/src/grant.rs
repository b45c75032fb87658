//! # Grants
//!
//! The argument to [`Noun::authorize`](crate::Noun::authorize): either every
//! verb the noun currently knows, or an explicit list of candidate verbs.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Marker that selects every verb in a noun's vocabulary.
pub const WILDCARD: &str = "*";

/// Verbs to grant a role.
///
/// In serialized form a grant is either the string `"*"` or an array of verbs.
///
/// # Example
///
/// ```
/// use noun_authz::Grant;
///
/// assert_eq!(Grant::parse("*"), Grant::All);
/// assert_eq!(Grant::parse("read, update"), Grant::verbs(["read", "update"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// Every verb in the vocabulary at the time of the grant.
    ///
    /// Verbs added to the noun later are not covered.
    All,

    /// Candidate verbs; those not in the vocabulary are dropped.
    Subset(Vec<String>),
}

impl Grant {
    /// Create a subset grant from any list of verbs.
    pub fn verbs<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Grant::Subset(verbs.into_iter().map(Into::into).collect())
    }

    /// Parse a grant from its textual form.
    ///
    /// Exactly `"*"` is the wildcard; anything else is a comma-separated
    /// verb list. Whitespace around verbs is trimmed and empty entries are
    /// skipped, so `" * "` is a list holding the verb `"*"`.
    pub fn parse(s: &str) -> Self {
        if s == WILDCARD {
            return Grant::All;
        }

        Grant::Subset(
            s.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// Check if this grant covers the whole vocabulary.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Grant::All)
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grant::All => f.write_str(WILDCARD),
            Grant::Subset(verbs) => f.write_str(&verbs.join(",")),
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for Grant {
    fn from(verbs: Vec<S>) -> Self {
        Grant::verbs(verbs)
    }
}

impl Serialize for Grant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Grant::All => serializer.serialize_str(WILDCARD),
            Grant::Subset(verbs) => verbs.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Grant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Wildcard(String),
            Verbs(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Wildcard(s) if s == WILDCARD => Ok(Grant::All),
            Repr::Wildcard(s) => Err(de::Error::custom(format!(
                "expected \"{}\" or a list of verbs, found \"{}\"",
                WILDCARD, s
            ))),
            Repr::Verbs(verbs) => Ok(Grant::Subset(verbs)),
        }
    }
}
