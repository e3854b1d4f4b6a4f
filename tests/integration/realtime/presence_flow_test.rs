//! End-to-end presence tests
//!
//! A real server on a local socket and `AuthContext` clients talking to it
//! over HTTP and SSE.

use std::time::Duration;

use assert_matches::assert_matches;
use tokio::time::timeout;

use pulsechat::backend::auth::users::delete_user;
use pulsechat::client::{AuthContext, ClientError, MemoryTokenStore, TokenStore};
use pulsechat::shared::{SendMessageRequest, SignupRequest};

use crate::common::spawn_http_server;

const WAIT: Duration = Duration::from_secs(10);

async fn wait_for_online(ctx: &AuthContext<MemoryTokenStore>, expected: &[String]) {
    let mut rx = ctx.subscribe_online();
    let mut expected = expected.to_vec();
    expected.sort();

    timeout(WAIT, rx.wait_for(|online| *online == expected))
        .await
        .unwrap_or_else(|_| panic!("online set never became {:?}", expected))
        .unwrap();
}

#[tokio::test]
async fn test_online_set_follows_logins_and_logouts() {
    let (base_url, state) = spawn_http_server().await;

    let mut alice = AuthContext::new(&base_url, MemoryTokenStore::new()).unwrap();
    let alice_user = alice.signup(SignupRequest::new("alice@x.com", "pw")).await.unwrap();
    assert!(alice.is_realtime_connected());

    let mut bob = AuthContext::new(&base_url, MemoryTokenStore::new()).unwrap();
    let bob_user = bob.signup(SignupRequest::new("bob@x.com", "pw")).await.unwrap();

    let both = vec![alice_user.id.to_string(), bob_user.id.to_string()];
    wait_for_online(&alice, &both).await;
    wait_for_online(&bob, &both).await;

    bob.logout().unwrap();
    assert!(bob.user().is_none());
    assert!(bob.online_users().is_empty());

    wait_for_online(&alice, &[alice_user.id.to_string()]).await;
    assert_eq!(
        state.presence.online_users().await.unwrap(),
        vec![alice_user.id.to_string()]
    );
}

#[tokio::test]
async fn test_message_reaches_online_receiver() {
    let (base_url, _state) = spawn_http_server().await;

    let mut alice = AuthContext::new(&base_url, MemoryTokenStore::new()).unwrap();
    let alice_user = alice.signup(SignupRequest::new("alice@x.com", "pw")).await.unwrap();
    let mut bob = AuthContext::new(&base_url, MemoryTokenStore::new()).unwrap();
    let bob_user = bob.signup(SignupRequest::new("bob@x.com", "pw")).await.unwrap();

    wait_for_online(
        &alice,
        &[alice_user.id.to_string(), bob_user.id.to_string()],
    )
    .await;

    let mut alice_inbox = alice.subscribe_messages();
    let mut bob_inbox = bob.subscribe_messages();

    let sent = bob
        .send_message(alice_user.id, SendMessageRequest::text("hello alice"))
        .await
        .unwrap();

    let received = timeout(WAIT, alice_inbox.recv()).await.unwrap().unwrap();
    assert_eq!(received, sent);
    assert!(bob_inbox.try_recv().is_err());

    let conversation = alice.conversation(bob_user.id).await.unwrap();
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation[0].text.as_deref(), Some("hello alice"));
}

#[tokio::test]
async fn test_load_restores_session_from_stored_token() {
    let (base_url, _state) = spawn_http_server().await;

    let store = MemoryTokenStore::new();
    let mut first = AuthContext::new(&base_url, store.clone()).unwrap();
    let user = first.signup(SignupRequest::new("carol@x.com", "pw")).await.unwrap();
    drop(first);

    // A second context over the same store picks the session up
    let mut second = AuthContext::new(&base_url, store.clone()).unwrap();
    let restored = second.load().await.unwrap();

    assert_eq!(restored.as_ref().map(|u| u.id), Some(user.id));
    assert!(second.is_realtime_connected());
    wait_for_online(&second, &[user.id.to_string()]).await;

    let token = second.token().unwrap().to_string();
    second.logout().unwrap();
    assert_eq!(store.load().unwrap(), None);

    // Logout is local; the token itself stays valid until it expires
    let check = second.api().check(&token).await.unwrap();
    assert_eq!(check.user_data.id, user.id);
}

#[tokio::test]
async fn test_rejected_load_ends_running_session() {
    let (base_url, state) = spawn_http_server().await;

    let store = MemoryTokenStore::new();
    let mut ctx = AuthContext::new(&base_url, store.clone()).unwrap();
    let user = ctx.signup(SignupRequest::new("dave@x.com", "pw")).await.unwrap();
    wait_for_online(&ctx, &[user.id.to_string()]).await;
    let token = ctx.token().unwrap().to_string();

    // The token still verifies but its user is gone
    assert!(delete_user(&state.db_pool, user.id).await.unwrap());

    let err = ctx.load().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(ctx.user().is_none());
    assert!(ctx.token().is_none());
    assert!(!ctx.is_realtime_connected());
    assert!(ctx.online_users().is_empty());
    assert_matches!(ctx.sidebar().await, Err(ClientError::NotAuthenticated));
    assert_eq!(store.load().unwrap(), Some(token));

    // Dropping the stream takes the user off the server's online set
    timeout(WAIT, async {
        while !state.presence.online_users().await.unwrap().is_empty() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("user stayed online after the session ended");
}
