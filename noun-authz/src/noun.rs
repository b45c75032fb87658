//! # Nouns
//!
//! A noun is a protected resource type such as "post" or "comment". It owns
//! a vocabulary of verbs and a permission table recording which roles may
//! perform which of those verbs.
//!
//! Vocabulary and permissions change independently: granting is filtered
//! against the vocabulary at grant time, and removing a verb later does not
//! revoke it from roles that already hold it.

use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{HookError, NounError, NounResult};
use crate::grant::Grant;
use crate::permissions::PermissionTable;
use crate::sealed::SealedNoun;

/// Verbs every noun starts with.
pub const DEFAULT_VERBS: [&str; 4] = ["create", "read", "update", "delete"];

/// Extension code that finishes configuring a noun during [`Noun::setup`].
///
/// Implemented for any `FnMut(&mut Noun) -> Result<(), HookError>` closure;
/// wrap closures in [`setup_hook`] to get their signature inferred.
pub trait NounExtension: Send {
    /// Run against the noun being set up.
    fn after_setup(&mut self, noun: &mut Noun) -> Result<(), HookError>;
}

impl<F> NounExtension for F
where
    F: FnMut(&mut Noun) -> Result<(), HookError> + Send,
{
    fn after_setup(&mut self, noun: &mut Noun) -> Result<(), HookError> {
        self(noun)
    }
}

/// Pin a closure to the [`NounExtension`] signature.
///
/// # Example
///
/// ```
/// use noun_authz::{setup_hook, Noun};
///
/// let mut post = Noun::new("post");
/// post.extend(setup_hook(|noun| {
///     noun.can("like");
///     Ok(())
/// }));
/// ```
pub fn setup_hook<F>(hook: F) -> F
where
    F: FnMut(&mut Noun) -> Result<(), HookError> + Send + 'static,
{
    hook
}

/// A resource type with its verb vocabulary and role permissions.
///
/// # Example
///
/// ```
/// use noun_authz::{Grant, Noun};
///
/// let mut post = Noun::new("post");
/// post.can("like");
/// post.authorize("admin", Grant::All);
/// post.authorize("viewer", Grant::verbs(["read", "like", "share"]));
///
/// assert!(post.check_authorization("admin", "delete"));
/// assert!(post.check_authorization("viewer", "like"));
/// assert!(!post.check_authorization("viewer", "share")); // not a verb of post
/// assert!(!post.check_authorization("guest", "read"));
/// ```
pub struct Noun {
    name: String,
    verbs: HashSet<String>,
    permissions: PermissionTable,
    deferred_setup: Vec<Box<dyn NounExtension>>,
    setup_runs: usize,
    in_setup: bool,
}

impl Noun {
    /// Create a noun with the default CRUD verbs and no permissions.
    ///
    /// # Arguments
    ///
    /// * `name` - The resource type name (e.g., "post")
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbs: DEFAULT_VERBS.iter().map(|v| v.to_string()).collect(),
            permissions: PermissionTable::new(),
            deferred_setup: Vec::new(),
            setup_runs: 0,
            in_setup: false,
        }
    }

    /// Get the noun's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a hook to run on the next [`setup`](Self::setup).
    pub(crate) fn register_deferred_setup(&mut self, hook: Box<dyn NounExtension>) {
        self.deferred_setup.push(hook);
    }

    /// Register extension code to run when the noun is set up.
    ///
    /// Nothing runs until [`setup`](Self::setup) is called.
    pub fn extend<E>(&mut self, extension: E)
    where
        E: NounExtension + 'static,
    {
        self.register_deferred_setup(Box::new(extension));
    }

    /// Run every registered hook, in registration order.
    ///
    /// Each hook receives this noun and may reconfigure it. The first hook
    /// to fail aborts the run: hooks after it do not run and nothing done by
    /// earlier hooks is rolled back. Hooks registered while the run is in
    /// progress are kept for later runs but not invoked by this one.
    ///
    /// Calling `setup` again runs every hook again. A call made from inside
    /// a hook does nothing and returns `Ok(())`. If a hook panics, the
    /// registered hooks are restored before the panic continues.
    ///
    /// # Errors
    ///
    /// [`NounError::SetupAborted`] carrying the failing hook's index and error.
    pub fn setup(&mut self) -> NounResult<()> {
        if self.in_setup {
            tracing::debug!(noun = %self.name, "Ignoring setup called from a setup hook");
            return Ok(());
        }
        if self.setup_runs > 0 {
            tracing::warn!(
                noun = %self.name,
                previous_runs = self.setup_runs,
                "Re-running deferred setup"
            );
        }
        self.setup_runs += 1;
        self.in_setup = true;

        let mut hooks = std::mem::take(&mut self.deferred_setup);
        let run = panic::catch_unwind(AssertUnwindSafe(|| self.run_hooks(&mut hooks)));

        let ran = hooks.len();
        hooks.append(&mut self.deferred_setup);
        self.deferred_setup = hooks;
        self.in_setup = false;

        let outcome = match run {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        };
        if outcome.is_ok() {
            tracing::debug!(noun = %self.name, hooks = ran, "Deferred setup complete");
        }
        outcome
    }

    fn run_hooks(&mut self, hooks: &mut [Box<dyn NounExtension>]) -> NounResult<()> {
        for (index, hook) in hooks.iter_mut().enumerate() {
            if let Err(source) = hook.after_setup(self) {
                tracing::error!(noun = %self.name, hook = index, error = %source, "Deferred setup hook failed");
                return Err(NounError::SetupAborted {
                    noun: self.name.clone(),
                    hook: index,
                    source,
                });
            }
        }
        Ok(())
    }

    /// Number of times [`setup`](Self::setup) has been started.
    pub fn setup_runs(&self) -> usize {
        self.setup_runs
    }

    /// Check if the verb is in the vocabulary.
    pub fn has_verb(&self, verb: &str) -> bool {
        self.verbs.contains(verb)
    }

    /// Add a verb to the vocabulary. Adding a known verb does nothing.
    ///
    /// For example, `post.can("like")` makes "like" grantable on posts.
    ///
    /// # Arguments
    ///
    /// * `verb` - The verb to add
    pub fn can(&mut self, verb: impl Into<String>) {
        let verb = verb.into();
        if !self.verbs.contains(&verb) {
            tracing::debug!(noun = %self.name, verb = %verb, "Adding verb");
            self.verbs.insert(verb);
        }
    }

    /// Remove a verb from the vocabulary. Removing an unknown verb does nothing.
    ///
    /// Roles already granted the verb keep it.
    pub fn cannot(&mut self, verb: &str) {
        if self.verbs.remove(verb) {
            tracing::debug!(noun = %self.name, verb = %verb, "Removed verb");
        }
    }

    /// Iterate over the vocabulary, in no particular order.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.verbs.iter().map(String::as_str)
    }

    /// Get the size of the vocabulary.
    pub fn verb_count(&self) -> usize {
        self.verbs.len()
    }

    /// Grant verbs to a role.
    ///
    /// [`Grant::All`] grants a snapshot of the current vocabulary.
    /// [`Grant::Subset`] grants only the candidates that are currently verbs
    /// of this noun; unknown verbs are dropped silently. Grants accumulate
    /// across calls, and the role gets an entry even if nothing was granted.
    ///
    /// # Arguments
    ///
    /// * `role` - The role receiving the grant
    /// * `grant` - Either [`Grant::All`] or the candidate verbs
    ///
    /// # Example
    ///
    /// ```
    /// use noun_authz::{Grant, Noun};
    ///
    /// let mut comment = Noun::new("comment");
    /// comment.authorize("editor", Grant::verbs(["read"]));
    /// comment.authorize("editor", Grant::verbs(["update"]));
    ///
    /// assert!(comment.check_authorization("editor", "read"));
    /// assert!(comment.check_authorization("editor", "update"));
    /// ```
    pub fn authorize(&mut self, role: impl Into<String>, grant: Grant) {
        let role = role.into();
        let verbs: Vec<String> = match grant {
            Grant::All => self.verbs.iter().cloned().collect(),
            Grant::Subset(candidates) => candidates
                .into_iter()
                .filter(|verb| {
                    let known = self.verbs.contains(verb);
                    if !known {
                        tracing::debug!(noun = %self.name, role = %role, verb = %verb, "Dropping grant of unknown verb");
                    }
                    known
                })
                .collect(),
        };

        let added = self.permissions.grant(role.as_str(), verbs);
        tracing::debug!(noun = %self.name, role = %role, added, "Authorized role");
    }

    /// Check if a role may perform a verb.
    ///
    /// Unknown roles and verbs are simply not authorized.
    pub fn check_authorization(&self, role: &str, verb: &str) -> bool {
        self.permissions.allows(role, verb)
    }

    /// Get the permission table.
    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    /// Freeze the noun for concurrent read-only use.
    ///
    /// Registered hooks are dropped; call [`setup`](Self::setup) first.
    pub fn seal(self) -> SealedNoun {
        tracing::debug!(noun = %self.name, "Sealing noun");
        SealedNoun::new(self.name, self.verbs, self.permissions)
    }

    /// Run [`setup`](Self::setup) once and seal the result.
    pub fn setup_and_seal(mut self) -> NounResult<SealedNoun> {
        self.setup()?;
        Ok(self.seal())
    }
}

impl fmt::Debug for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Noun")
            .field("name", &self.name)
            .field("verbs", &self.verbs)
            .field("permissions", &self.permissions)
            .field("deferred_setup", &self.deferred_setup.len())
            .field("setup_runs", &self.setup_runs)
            .finish()
    }
}
