use common_net::prelude::*;
use std::time::Duration;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn slow_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    Mock::given(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast"))
        .mount(&server)
        .await;
    server
}

async fn wait_for_in_flight(client: &HttpClient, tag: &str, expected: usize) {
    for _ in 0..200 {
        if client.in_flight(tag) == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("tag {tag} never reached {expected} in-flight requests");
}

#[tokio::test]
async fn cancelling_a_tag_fails_its_requests() {
    let server = slow_server().await;
    let client = HttpClient::new(NetConfig::new(server.uri())).unwrap();

    let first = client.spawn(RequestKind::Get, RequestOptions::new("/slow").tag("screen"));
    let second = client.spawn(RequestKind::Json, RequestOptions::new("/slow").tag("screen"));
    let unrelated = client.spawn(RequestKind::Get, RequestOptions::new("/fast").tag("other"));

    wait_for_in_flight(&client, "screen", 2).await;
    assert_eq!(client.cancel("screen"), 2);

    for pending in [first, second] {
        match tokio::time::timeout(Duration::from_secs(1), pending).await {
            Ok(Err(NetError::Cancelled { tag })) => assert_eq!(tag, "screen"),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }
    let resp = unrelated.await.expect("untouched tag completes");
    assert_eq!(resp.text(), "fast");
    assert_eq!(client.in_flight("screen"), 0);
}

#[tokio::test]
async fn cancel_right_after_spawn_reaches_the_request() {
    let server = slow_server().await;
    let client = HttpClient::new(NetConfig::new(server.uri())).unwrap();

    let pending = client.spawn(RequestKind::Get, RequestOptions::new("/slow").tag("screen"));
    assert_eq!(client.cancel("screen"), 1);

    match tokio::time::timeout(Duration::from_secs(1), pending).await {
        Ok(Err(NetError::Cancelled { tag })) => assert_eq!(tag, "screen"),
        other => panic!("expected Cancelled, got {other:?}"),
    }
    assert_eq!(client.in_flight("screen"), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn requests_after_cancel_are_not_affected() {
    let server = slow_server().await;
    let client = HttpClient::new(NetConfig::new(server.uri())).unwrap();

    assert_eq!(client.cancel("screen"), 0);
    let resp = client
        .get(RequestOptions::new("/fast").tag("screen"))
        .await
        .expect("fresh request is not cancelled");
    assert_eq!(resp.text(), "fast");
}

#[tokio::test]
async fn untagged_requests_ignore_cancel_all() {
    let server = slow_server().await;
    let client = HttpClient::new(NetConfig::new(server.uri())).unwrap();

    let tagged = client.spawn(RequestKind::Get, RequestOptions::new("/slow").tag("a"));
    let untagged = client.spawn(RequestKind::Get, "/fast");
    wait_for_in_flight(&client, "a", 1).await;

    assert_eq!(client.cancel_all(), 1);
    assert!(matches!(tagged.await, Err(NetError::Cancelled { .. })));
    assert!(untagged.await.is_ok());
}

#[tokio::test]
async fn clones_share_the_tag_registry() {
    let server = slow_server().await;
    let client = HttpClient::new(NetConfig::new(server.uri())).unwrap();
    let clone = client.clone();
    assert!(client.same_instance(&clone));

    let pending = clone.spawn(RequestKind::Post, RequestOptions::new("/slow").tag("shared"));
    wait_for_in_flight(&client, "shared", 1).await;
    assert_eq!(client.cancel("shared"), 1);
    assert!(pending.await.unwrap_err().is_cancelled());
}
