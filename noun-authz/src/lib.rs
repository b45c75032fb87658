//! # Noun Authorization
//!
//! Role-based authorization for named resource types.
//!
//! ## Overview
//!
//! The noun-authz crate handles:
//! - **Nouns**: Resource types such as "post" or "comment"
//! - **Verbs**: Actions a noun supports (CRUD by default, plus custom verbs)
//! - **Grants**: Which roles may perform which verbs on a noun
//! - **Deferred setup**: Extension hooks run once configuration is complete
//!
//! ## Model
//!
//! ```text
//! Noun = name + verbs + { role -> granted verbs }
//!
//! post.can("like")                       - "like" becomes a verb of post
//! post.authorize("admin", *)             - admin gets every current verb
//! post.authorize("viewer", [read, like]) - only verbs post knows are granted
//! post.check_authorization("viewer", "like") == true
//! ```
//!
//! Roles are opaque labels supplied by the caller. There is no role
//! hierarchy and no per-instance permission; a grant applies to the whole
//! resource type.
//!
//! ## Usage
//!
//! ```rust
//! use noun_authz::{setup_hook, Grant, Noun};
//!
//! let mut post = Noun::new("post");
//! post.can("like");
//! post.extend(setup_hook(|post| {
//!     post.authorize("member", Grant::verbs(["read", "like"]));
//!     Ok(())
//! }));
//! post.authorize("admin", Grant::All);
//!
//! // Run deferred setup once, then share the frozen noun with readers
//! let post = post.setup_and_seal().unwrap();
//!
//! assert!(post.check_authorization("admin", "delete"));
//! assert!(post.check_authorization("member", "like"));
//! assert!(!post.check_authorization("member", "delete"));
//! assert!(!post.check_authorization("guest", "read"));
//! ```
//!
//! ## Concurrency
//!
//! [`Noun`] is meant to be configured by one owner at startup. Once
//! configured, [`Noun::seal`] turns it into a [`SealedNoun`], which has no
//! mutating methods and can be shared across threads behind an `Arc`.

pub mod error;
pub mod grant;
pub mod noun;
pub mod permissions;
pub mod policy;
pub mod sealed;

// Re-export main types for convenience
pub use error::{HookError, NounError, NounResult};
pub use grant::{Grant, WILDCARD};
pub use noun::{setup_hook, Noun, NounExtension, DEFAULT_VERBS};
pub use permissions::PermissionTable;
pub use policy::NounPolicy;
pub use sealed::SealedNoun;
