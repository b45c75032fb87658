//! # Sealed nouns
//!
//! A [`SealedNoun`] is the read-only form of a configured [`Noun`](crate::Noun).
//! It has no mutating methods, so it can be wrapped in an `Arc` and queried
//! from any number of threads without locking.

use serde::Serialize;
use std::collections::HashSet;

use crate::permissions::PermissionTable;

/// An immutable noun, produced by [`Noun::seal`](crate::Noun::seal).
///
/// Serializable for diagnostics only. The sole way to build one is sealing a
/// noun, so every grant it holds went through [`Noun::authorize`](crate::Noun::authorize).
///
/// # Example
///
/// ```
/// use noun_authz::{Grant, Noun};
/// use std::sync::Arc;
///
/// let mut post = Noun::new("post");
/// post.authorize("viewer", Grant::verbs(["read"]));
/// let post = Arc::new(post.seal());
///
/// let reader = Arc::clone(&post);
/// let allowed = std::thread::spawn(move || reader.check_authorization("viewer", "read"))
///     .join()
///     .unwrap();
/// assert!(allowed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SealedNoun {
    name: String,
    verbs: HashSet<String>,
    permissions: PermissionTable,
}

impl SealedNoun {
    pub(crate) fn new(name: String, verbs: HashSet<String>, permissions: PermissionTable) -> Self {
        Self {
            name,
            verbs,
            permissions,
        }
    }

    /// Get the noun's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the verb is in the vocabulary.
    pub fn has_verb(&self, verb: &str) -> bool {
        self.verbs.contains(verb)
    }

    /// Check if a role may perform a verb.
    pub fn check_authorization(&self, role: &str, verb: &str) -> bool {
        self.permissions.allows(role, verb)
    }

    /// Iterate over the vocabulary, in no particular order.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.verbs.iter().map(String::as_str)
    }

    /// Get the permission table.
    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }
}
