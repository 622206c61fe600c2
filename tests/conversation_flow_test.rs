//! End-to-end conversation flows: App + real HTTP client + wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tally::app::{App, AppMessage, Intent};
use tally::client::AgentClient;
use tally::config::ClientConfig;
use tally::error::SubmitRejected;
use tally::models::MessageRole;
use tally::state::ThreadStatus;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer) -> (App, UnboundedReceiver<AppMessage>) {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_request_timeout(Duration::from_secs(5));
    let client = AgentClient::from_config(&config).unwrap();
    let mut app = App::new(Arc::new(client));
    let rx = app.message_rx.take().unwrap();
    (app, rx)
}

async fn pump(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>) -> AppMessage {
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("message before timeout")
        .expect("channel open");
    app.handle_message(msg.clone());
    msg
}

#[tokio::test]
async fn test_two_turns_share_one_thread() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"thread_id": null})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t1", "response": "3"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"thread_id": "t1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t1", "response": "2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server);

    app.dispatch(Intent::Submit("How many r's in strawberry?".into()))
        .unwrap();
    pump(&mut app, &mut rx).await;
    app.dispatch(Intent::Submit("and the e's?".into())).unwrap();
    pump(&mut app, &mut rx).await;

    let snapshot = app.snapshot();
    assert_eq!(snapshot.thread_id, Some("t1"));
    assert_eq!(snapshot.status, ThreadStatus::Idle);
    let roles: Vec<_> = snapshot.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Agent,
            MessageRole::User,
            MessageRole::Agent
        ]
    );
    assert_eq!(snapshot.messages[3].content, "2");
}

#[tokio::test]
async fn test_failed_send_rolls_back_and_retry_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t7", "response": "1"})),
        )
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server);

    app.dispatch(Intent::Submit("How many z's in 'pizza'?".into()))
        .unwrap();
    pump(&mut app, &mut rx).await;

    let snapshot = app.snapshot();
    assert_eq!(snapshot.status, ThreadStatus::Error);
    assert!(snapshot.messages.is_empty());
    assert!(snapshot.last_error.unwrap().starts_with("Failed to send message"));
    assert_eq!(snapshot.thread_id, None);

    // Submitting again clears the error and retries
    app.dispatch(Intent::Submit("How many z's in 'pizza'?".into()))
        .unwrap();
    assert_eq!(app.snapshot().last_error, None);
    pump(&mut app, &mut rx).await;

    let snapshot = app.snapshot();
    assert_eq!(snapshot.status, ThreadStatus::Idle);
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.thread_id, Some("t7"));
}

#[tokio::test]
async fn test_single_flight() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"thread_id": "t1", "response": "ok"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server);

    app.dispatch(Intent::Submit("first".into())).unwrap();
    assert_eq!(
        app.dispatch(Intent::Submit("second".into())),
        Err(SubmitRejected::InFlight)
    );
    assert_eq!(app.snapshot().messages.len(), 1);

    pump(&mut app, &mut rx).await;
    assert_eq!(app.snapshot().messages.len(), 2);
}

#[tokio::test]
async fn test_clear_mid_flight_discards_reply_and_deletes_thread() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"message": "first"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t1", "response": "one"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"message": "slow"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"thread_id": "t1", "response": "too late"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/conversations/t1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server);

    app.dispatch(Intent::Submit("first".into())).unwrap();
    pump(&mut app, &mut rx).await;
    assert_eq!(app.snapshot().thread_id, Some("t1"));

    app.dispatch(Intent::Submit("slow".into())).unwrap();
    app.dispatch(Intent::Clear).unwrap();

    let snapshot = app.snapshot();
    assert!(snapshot.messages.is_empty());
    assert_eq!(snapshot.thread_id, None);
    assert_eq!(snapshot.status, ThreadStatus::Idle);

    // Both the delete acknowledgment and the stale reply arrive; neither
    // touches the fresh thread.
    let mut saw_delete = false;
    let mut saw_stale = false;
    for _ in 0..2 {
        match pump(&mut app, &mut rx).await {
            AppMessage::ThreadDeleted { thread_id, result } => {
                assert_eq!(thread_id, "t1");
                assert!(result.is_ok());
                saw_delete = true;
            }
            AppMessage::SendCompleted { .. } => saw_stale = true,
            other => panic!("unexpected message {:?}", other),
        }
    }
    assert!(saw_delete && saw_stale);

    let snapshot = app.snapshot();
    assert!(snapshot.messages.is_empty());
    assert_eq!(snapshot.thread_id, None);
    assert_eq!(snapshot.status, ThreadStatus::Idle);
}

#[tokio::test]
async fn test_delete_failure_is_not_shown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t1", "response": "ok"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/conversations/t1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut app, mut rx) = app_for(&server);

    app.dispatch(Intent::Submit("hi".into())).unwrap();
    pump(&mut app, &mut rx).await;
    app.dispatch(Intent::Clear).unwrap();

    match pump(&mut app, &mut rx).await {
        AppMessage::ThreadDeleted { result, .. } => assert!(result.is_err()),
        other => panic!("unexpected message {:?}", other),
    }
    assert_eq!(app.snapshot().last_error, None);
    assert_eq!(app.snapshot().status, ThreadStatus::Idle);
}
