//! End-to-end tests for the JSON receiver and its acknowledgment simulator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use cmd_relay::ack::{AckSimulator, FixedTokens};
use cmd_relay::executor::ShellExecutor;
use cmd_relay::{HttpServer, ServiceKind};
use reqwest::StatusCode;
use serde_json::json;

mod common;

const EVENT_PATH: &str = "/api/v1/cctv/events/active";

async fn receiver_with_token(token: u8, delay: Duration) -> common::TestServer {
    let simulator = AckSimulator::with_tokens(false, delay, Arc::new(FixedTokens(token)));
    let server = HttpServer::with_components(
        ServiceKind::Receiver,
        common::plain_config(),
        Arc::new(ShellExecutor::new()),
        simulator,
    );
    common::spawn(server).await
}

#[tokio::test]
async fn forced_ack_answers_ack_without_delay() {
    let mut config = common::plain_config();
    config.ack.forced = true;
    config.ack.delay_ms = 10_000;
    let server = common::spawn_service(ServiceKind::Receiver, config).await;
    let client = common::client();

    let start = Instant::now();
    let res = client
        .post(server.url(EVENT_PATH))
        .json(&json!({"camera": "north-gate", "event": "motion"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/html");
    assert_eq!(res.text().await.unwrap(), "ACK");

    // Body content does not matter.
    let res = client
        .post(server.url("/site-4/api/v1/cctv/events/active"))
        .body("definitely not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "ACK");
    assert!(start.elapsed() < Duration::from_secs(5));

    server.stop().await;
}

#[tokio::test]
async fn nack_token_answers_nack() {
    let server = receiver_with_token(1, Duration::from_secs(10)).await;
    let res = common::client()
        .post(server.url(EVENT_PATH))
        .json(&json!({"id": 7}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "NACK");
    server.stop().await;
}

#[tokio::test]
async fn large_event_body_is_drained_and_logged() {
    let (logs, _guard) = common::capture_logs();
    let mut config = common::plain_config();
    config.ack.forced = true;
    let server = common::spawn_service(ServiceKind::Receiver, config).await;

    for size in [100_000, 1_000_000] {
        let camera = format!("dock-{size}");
        let res = common::client()
            .post(server.url(EVENT_PATH))
            .json(&json!({"camera": camera, "blob": "x".repeat(size)}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.text().await.unwrap(), "ACK");
        assert!(
            logs.wait_for(&camera, Duration::from_secs(5)).await,
            "payload of {size} bytes never logged"
        );
    }

    let output = logs.contents();
    assert_eq!(output.matches("Received JSON payload").count(), 2);
    assert!(!output.contains("Could not decode submitted payload"));
    server.stop().await;
}

#[tokio::test]
async fn delayed_ack_sends_headers_before_body() {
    let delay = Duration::from_millis(1_000);
    let server = receiver_with_token(4, delay).await;

    let start = Instant::now();
    let res = common::client()
        .post(server.url(EVENT_PATH))
        .json(&json!({"id": 8}))
        .send()
        .await
        .unwrap();
    let headers_at = start.elapsed();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(headers_at < delay, "headers took {headers_at:?}");

    assert_eq!(res.text().await.unwrap(), "ACK");
    assert!(start.elapsed() >= delay);

    server.stop().await;
}

#[tokio::test]
async fn delayed_acks_run_concurrently() {
    let delay = Duration::from_millis(1_000);
    let server = receiver_with_token(2, delay).await;
    let client = common::client();

    let start = Instant::now();
    let requests: Vec<_> = (0..6)
        .map(|id| {
            let client = client.clone();
            let url = server.url(EVENT_PATH);
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&json!({ "id": id }))
                    .send()
                    .await
                    .unwrap()
                    .text()
                    .await
                    .unwrap()
            })
        })
        .collect();

    for request in requests {
        assert_eq!(request.await.unwrap(), "ACK");
    }
    let elapsed = start.elapsed();
    assert!(elapsed >= delay);
    assert!(elapsed < delay * 3, "requests were serialized: {elapsed:?}");

    server.stop().await;
}

#[tokio::test]
async fn unrouted_post_is_empty_200() {
    let server = common::spawn_service(ServiceKind::Receiver, common::plain_config()).await;
    let res = common::client()
        .post(server.url("/api/v1/cctv/events/closed"))
        .json(&json!({"id": 9}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "");
    server.stop().await;
}

#[tokio::test]
async fn receiver_get_fallback_is_404() {
    let server = common::spawn_service(ServiceKind::Receiver, common::plain_config()).await;
    let res = common::client()
        .get(server.url(EVENT_PATH))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    server.stop().await;
}

#[tokio::test]
async fn tls_listener_acknowledges_events() {
    let dir = tempfile::tempdir().unwrap();
    let generated = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert = dir.path().join("cert.pem");
    let key = dir.path().join("key.pem");
    std::fs::write(&cert, generated.cert.pem()).unwrap();
    std::fs::write(&key, generated.key_pair.serialize_pem()).unwrap();

    let port = {
        let spare = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        spare.local_addr().unwrap().port()
    };

    let mut config = common::plain_config();
    config.ack.forced = true;
    config.listener.tls_port = port;
    config.listener.tls = Some(cmd_relay::config::TlsConfig {
        cert_path: cert,
        key_path: key,
        ..Default::default()
    });

    let shutdown = cmd_relay::Shutdown::new();
    let stop = shutdown.subscribe();
    let handle = tokio::spawn(cmd_relay::lifecycle::serve(ServiceKind::Receiver, config, stop));

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let url = format!("https://localhost:{port}{EVENT_PATH}");

    let mut answer = None;
    for _ in 0..50 {
        match client.post(&url).json(&json!({"id": 10})).send().await {
            Ok(res) => {
                answer = Some(res.text().await.unwrap());
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
    assert_eq!(answer.as_deref(), Some("ACK"));
    drop(client);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap();
    assert!(result.unwrap().is_ok());
}
