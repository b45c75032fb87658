//! Declarative noun configuration.
//!
//! A policy describes a noun's vocabulary changes and role grants as data,
//! so applications can keep authorization rules in configuration files or
//! environment variables instead of code.
//!
//! ```json
//! {
//!   "name": "post",
//!   "verbs": ["like"],
//!   "remove_verbs": ["delete"],
//!   "grants": {
//!     "admin": "*",
//!     "viewer": ["read", "like"]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{NounError, NounResult};
use crate::grant::Grant;
use crate::noun::Noun;

/// Configuration for a single noun.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounPolicy {
    /// Name of the noun
    pub name: String,

    /// Verbs to add to the default vocabulary
    #[serde(default)]
    pub verbs: Vec<String>,

    /// Verbs to remove from the vocabulary (applied after additions)
    #[serde(default)]
    pub remove_verbs: Vec<String>,

    /// Grants per role (applied after all vocabulary changes)
    #[serde(default)]
    pub grants: BTreeMap<String, Grant>,
}

impl NounPolicy {
    /// Parse a policy from JSON.
    ///
    /// # Errors
    ///
    /// [`NounError::InvalidPolicy`] if the document is malformed.
    pub fn from_json(json: &str) -> NounResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a policy from a JSON document held in an environment variable.
    ///
    /// # Errors
    ///
    /// [`NounError::MissingEnvVar`] if the variable is unset, or
    /// [`NounError::InvalidPolicy`] if its value is malformed.
    pub fn from_env(var: &str) -> NounResult<Self> {
        let json = std::env::var(var).map_err(|_| NounError::MissingEnvVar(var.to_string()))?;
        Self::from_json(&json)
    }

    /// Apply this policy's verbs and grants to an existing noun.
    ///
    /// The policy name is not checked against the noun's name.
    pub fn apply(&self, noun: &mut Noun) {
        for verb in &self.verbs {
            noun.can(verb.as_str());
        }
        for verb in &self.remove_verbs {
            noun.cannot(verb);
        }
        for (role, grant) in &self.grants {
            noun.authorize(role.as_str(), grant.clone());
        }
        tracing::debug!(
            noun = %noun.name(),
            roles = self.grants.len(),
            "Applied noun policy"
        );
    }

    /// Build a fresh noun from this policy.
    ///
    /// # Example
    ///
    /// ```
    /// use noun_authz::NounPolicy;
    ///
    /// let policy = NounPolicy::from_json(r#"{
    ///     "name": "post",
    ///     "verbs": ["like"],
    ///     "grants": { "admin": "*", "viewer": ["read", "like"] }
    /// }"#).unwrap();
    ///
    /// let post = policy.build();
    /// assert!(post.check_authorization("admin", "like"));
    /// assert!(post.check_authorization("viewer", "like"));
    /// assert!(!post.check_authorization("viewer", "delete"));
    /// ```
    pub fn build(&self) -> Noun {
        let mut noun = Noun::new(self.name.as_str());
        self.apply(&mut noun);
        noun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_policy() {
        let policy = NounPolicy::from_json(r#"{ "name": "comment" }"#).unwrap();
        assert!(policy.verbs.is_empty());
        assert!(policy.grants.is_empty());

        let noun = policy.build();
        assert_eq!(noun.name(), "comment");
        assert_eq!(noun.verb_count(), 4);
        assert!(noun.permissions().is_empty());
    }

    #[test]
    fn test_removals_apply_before_grants() {
        let policy = NounPolicy::from_json(
            r#"{
                "name": "post",
                "verbs": ["like"],
                "remove_verbs": ["delete"],
                "grants": { "admin": "*", "viewer": ["read", "delete"] }
            }"#,
        )
        .unwrap();

        let noun = policy.build();
        assert!(noun.has_verb("like"));
        assert!(!noun.has_verb("delete"));
        assert!(noun.check_authorization("admin", "like"));
        assert!(!noun.check_authorization("admin", "delete"));
        assert!(noun.check_authorization("viewer", "read"));
        assert!(!noun.check_authorization("viewer", "delete"));
    }

    #[test]
    fn test_apply_to_existing_noun() {
        let mut noun = Noun::new("post");
        noun.authorize("editor", Grant::verbs(["read"]));

        let policy = NounPolicy {
            name: "post".to_string(),
            grants: BTreeMap::from([("editor".to_string(), Grant::verbs(["update"]))]),
            ..Default::default()
        };
        policy.apply(&mut noun);

        assert!(noun.check_authorization("editor", "read"));
        assert!(noun.check_authorization("editor", "update"));
    }

    #[test]
    fn test_invalid_policy() {
        let err = NounPolicy::from_json(r#"{ "grants": {} }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_POLICY");

        let err = NounPolicy::from_json(r#"{ "name": "post", "grants": { "admin": "all" } }"#)
            .unwrap_err();
        assert!(matches!(err, NounError::InvalidPolicy(_)));
    }

    #[test]
    fn test_from_env() {
        let var = "NOUN_AUTHZ_TEST_POLICY";
        std::env::set_var(var, r#"{ "name": "post", "grants": { "viewer": ["read"] } }"#);
        let policy = NounPolicy::from_env(var).unwrap();
        std::env::remove_var(var);
        assert!(policy.build().check_authorization("viewer", "read"));

        let err = NounPolicy::from_env("NOUN_AUTHZ_TEST_POLICY_UNSET").unwrap_err();
        assert!(matches!(err, NounError::MissingEnvVar(_)));
    }
}
