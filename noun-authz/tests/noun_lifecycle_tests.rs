//! End-to-end tests for the noun lifecycle.
//!
//! These tests drive a noun the way an application does: construct it,
//! register extensions, configure verbs and grants, run setup once, then
//! answer authorization checks, including from many concurrent readers
//! once the noun is sealed.

use noun_authz::{setup_hook, Grant, HookError, Noun, NounError, NounExtension, NounPolicy};
use std::sync::{Arc, Mutex};

/// Extension that adds social verbs and lets members use them.
struct SocialExtension {
    /// Roles allowed to like and share.
    roles: Vec<String>,
}

impl NounExtension for SocialExtension {
    fn after_setup(&mut self, noun: &mut Noun) -> Result<(), HookError> {
        noun.can("like");
        noun.can("share");
        for role in &self.roles {
            noun.authorize(role.as_str(), Grant::verbs(["read", "like", "share"]));
        }
        Ok(())
    }
}

/// Extension that refuses to run on nouns without a "read" verb.
struct RequiresRead;

impl NounExtension for RequiresRead {
    fn after_setup(&mut self, noun: &mut Noun) -> Result<(), HookError> {
        if noun.has_verb("read") {
            Ok(())
        } else {
            Err(format!("noun '{}' has no read verb", noun.name()).into())
        }
    }
}

#[test]
fn test_application_startup_flow() {
    let mut post = Noun::new("post");
    post.extend(SocialExtension {
        roles: vec!["member".to_string()],
    });
    post.extend(RequiresRead);
    post.authorize("admin", Grant::All);

    post.setup().unwrap();

    // Admin's wildcard was taken before the social verbs existed
    assert!(post.check_authorization("admin", "delete"));
    assert!(!post.check_authorization("admin", "like"));

    assert!(post.check_authorization("member", "read"));
    assert!(post.check_authorization("member", "share"));
    assert!(!post.check_authorization("member", "update"));
}

#[test]
fn test_failing_extension_stops_setup() {
    let ran_after = Arc::new(Mutex::new(false));

    let mut secret = Noun::new("secret");
    secret.cannot("read");
    secret.extend(RequiresRead);
    let flag = Arc::clone(&ran_after);
    secret.extend(setup_hook(move |_| {
        *flag.lock().unwrap() = true;
        Ok(())
    }));

    let err = secret.setup().unwrap_err();
    assert!(matches!(err, NounError::SetupAborted { hook: 0, .. }));
    assert_eq!(
        err.to_string(),
        "Setup of noun 'secret' aborted at hook 0: noun 'secret' has no read verb"
    );
    assert!(!*ran_after.lock().unwrap());
}

#[test]
fn test_policy_then_extensions() {
    let policy = NounPolicy::from_json(
        r#"{
            "name": "comment",
            "remove_verbs": ["update"],
            "grants": { "moderator": "*", "author": ["create", "read", "update"] }
        }"#,
    )
    .unwrap();

    let mut comment = policy.build();
    comment.extend(SocialExtension {
        roles: vec!["author".to_string()],
    });
    let comment = comment.setup_and_seal().unwrap();

    assert!(comment.check_authorization("moderator", "delete"));
    assert!(!comment.check_authorization("moderator", "update"));
    assert!(comment.check_authorization("author", "create"));
    assert!(!comment.check_authorization("author", "update"));
    assert!(comment.check_authorization("author", "like"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_on_sealed_noun() {
    let mut post = Noun::new("post");
    post.can("like");
    post.authorize("admin", Grant::All);
    post.authorize("viewer", Grant::verbs(["read", "like"]));
    let post = Arc::new(post.setup_and_seal().unwrap());

    let mut handles = Vec::new();
    for i in 0..32 {
        let post = Arc::clone(&post);
        handles.push(tokio::spawn(async move {
            let role = if i % 2 == 0 { "admin" } else { "viewer" };
            (
                role,
                post.check_authorization(role, "like"),
                post.check_authorization(role, "delete"),
            )
        }));
    }

    for handle in handles {
        let (role, can_like, can_delete) = handle.await.unwrap();
        assert!(can_like);
        assert_eq!(can_delete, role == "admin");
    }
}
