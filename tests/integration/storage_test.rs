//! Storage integration tests
//!
//! Exercise the user and message tables together, below the HTTP layer.

use pretty_assertions::assert_eq;

use pulsechat::backend::auth::users::{create_user, delete_user, NewUser};
use pulsechat::backend::messaging::db::{create_message, get_conversation, unseen_counts};

use crate::assert_ok;
use crate::common::TestDatabase;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        full_name: email.to_string(),
        password_hash: "hash".to_string(),
        bio: String::new(),
    }
}

#[tokio::test]
async fn test_deleting_a_user_removes_their_messages() {
    let db = TestDatabase::new().await;
    let alice = assert_ok!(create_user(db.pool(), new_user("alice@x.com")).await);
    let bob = assert_ok!(create_user(db.pool(), new_user("bob@x.com")).await);

    assert_ok!(create_message(db.pool(), alice.id, bob.id, Some("hi"), None).await);
    assert_ok!(create_message(db.pool(), bob.id, alice.id, None, Some("https://cdn.test/a.png")).await);
    assert_eq!(db.count("messages").await, 2);

    assert!(assert_ok!(delete_user(db.pool(), alice.id).await));

    assert_eq!(db.count("users").await, 1);
    assert_eq!(db.count("messages").await, 0);
    assert!(assert_ok!(unseen_counts(db.pool(), bob.id).await).is_empty());
}

#[tokio::test]
async fn test_message_to_unknown_user_is_rejected() {
    let db = TestDatabase::new().await;
    let alice = assert_ok!(create_user(db.pool(), new_user("alice@x.com")).await);

    let result = create_message(db.pool(), alice.id, uuid::Uuid::new_v4(), Some("hi"), None).await;
    assert!(result.is_err());
    assert_eq!(db.count("messages").await, 0);
}

#[tokio::test]
async fn test_image_only_message_round_trips() {
    let db = TestDatabase::new().await;
    let alice = assert_ok!(create_user(db.pool(), new_user("alice@x.com")).await);
    let bob = assert_ok!(create_user(db.pool(), new_user("bob@x.com")).await);

    let sent = assert_ok!(create_message(db.pool(), alice.id, bob.id, None, Some("img-ref")).await);
    let conversation = assert_ok!(get_conversation(db.pool(), bob.id, alice.id).await);

    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation[0].id, sent.id);
    assert_eq!(conversation[0].text, None);
    assert_eq!(conversation[0].image.as_deref(), Some("img-ref"));
}
