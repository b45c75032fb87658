//! # Permissions
//!
//! The permission table of a noun: which verbs each role has been granted.
//! The table knows nothing about vocabularies; filtering against the noun's
//! verbs happens before anything reaches it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Mapping from role to the verbs granted to that role.
///
/// A role with no entry has no permissions. Grants only ever accumulate.
///
/// # Example
///
/// ```
/// use noun_authz::PermissionTable;
///
/// let mut table = PermissionTable::new();
/// table.grant("editor", ["read", "update"]);
///
/// assert!(table.allows("editor", "read"));
/// assert!(!table.allows("editor", "delete"));
/// assert!(!table.allows("viewer", "read"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable {
    grants: HashMap<String, HashSet<String>>,
}

impl PermissionTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Add verbs to a role's grant.
    ///
    /// The role's entry is created even if `verbs` is empty.
    ///
    /// # Returns
    ///
    /// The number of verbs that were not already granted
    pub fn grant<I, S>(&mut self, role: impl Into<String>, verbs: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let granted = self.grants.entry(role.into()).or_default();
        let mut added = 0;
        for verb in verbs {
            if granted.insert(verb.into()) {
                added += 1;
            }
        }
        added
    }

    /// Check if a role has been granted a verb.
    pub fn allows(&self, role: &str, verb: &str) -> bool {
        self.grants
            .get(role)
            .is_some_and(|verbs| verbs.contains(verb))
    }

    /// Get the verbs granted to a role, if the role has an entry.
    pub fn verbs_for(&self, role: &str) -> Option<&HashSet<String>> {
        self.grants.get(role)
    }

    /// Check if a role has an entry, even an empty one.
    pub fn contains_role(&self, role: &str) -> bool {
        self.grants.contains_key(role)
    }

    /// Iterate over all roles with an entry.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.grants.keys().map(String::as_str)
    }

    /// Get the number of roles with an entry.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
