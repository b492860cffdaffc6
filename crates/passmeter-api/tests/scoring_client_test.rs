#![allow(clippy::unwrap_used)]
// Integration tests for `ScoringClient` using wiremock.

use serde_json::json;
use std::time::Duration;

use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use passmeter_api::{Error, ScoringClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ScoringClient) {
    let server = MockServer::start().await;
    let origin = Url::parse(&server.uri()).unwrap();
    let client = ScoringClient::new(Some(&origin), &TransportConfig::default()).unwrap();
    (server, client)
}

fn analysis_body(score: i64, label: &str) -> serde_json::Value {
    json!({
        "score": score,
        "strength_label": label,
        "strength_color": "#22c55e",
        "entropy_bits": 65.5,
        "is_common": false,
        "checks": {
            "length_ok": true,
            "length_great": false,
            "has_uppercase": true,
            "has_lowercase": true,
            "has_digit": true,
            "has_special": true,
            "not_common": true,
            "no_repeated_chars": true,
            "no_sequential_chars": true,
            "no_keyboard_pattern": true
        },
        "tips": ["Consider 16 or more characters."],
        "positive_feedbacks": ["Contains digits."]
    })
}

// ── Password endpoints ──────────────────────────────────────────────

#[tokio::test]
async fn test_analyze_posts_password() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/password/analyze"))
        .and(body_json(json!({ "password": "Tr0ub4dor&3x" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body(4, "Strong")))
        .expect(1)
        .mount(&server)
        .await;

    let analysis = client.analyze("Tr0ub4dor&3x").await.unwrap();

    assert_eq!(analysis.score, 4);
    assert_eq!(analysis.strength_label, "Strong");
    assert!((analysis.entropy_bits - 65.5).abs() < f64::EPSILON);
    assert_eq!(analysis.checks.len(), 10);
    assert_eq!(analysis.tips, vec!["Consider 16 or more characters."]);
}

#[tokio::test]
async fn test_capture_uses_validate_route() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/password/validate"))
        .and(body_json(json!({ "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body(1, "Very weak")))
        .expect(1)
        .mount(&server)
        .await;

    let analysis = client.capture("hunter2").await.unwrap();
    assert_eq!(analysis.score, 1);
}

#[tokio::test]
async fn test_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/password/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_analisadas": 3,
            "distribuicao_scores": [{ "score": 2, "total": 3 }]
        })))
        .mount(&server)
        .await;

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total_analyzed, 3);
    assert_eq!(stats.score_distribution[0].score, 2);
}

#[tokio::test]
async fn test_tools() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "password-validator",
                "name": "Password Validator",
                "description": "Check a password",
                "icon": "🔐",
                "route": "/password",
                "available": true
            }
        ])))
        .mount(&server)
        .await;

    let tools = client.tools().await.unwrap();
    assert_eq!(tools.len(), 1);
    assert!(tools[0].available);
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_maps_to_http() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/password/analyze"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client.analyze("whatever").await.unwrap_err();
    assert!(!err.is_timeout());
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/password/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let result = client.analyze("whatever").await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("proxy")),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    // Nothing listens on this port once the server is dropped.
    let origin = {
        let server = MockServer::start().await;
        Url::parse(&server.uri()).unwrap()
    };
    let client = ScoringClient::new(Some(&origin), &TransportConfig::default()).unwrap();

    let result = client.analyze("whatever").await;
    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/password/analyze"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let origin = Url::parse(&server.uri()).unwrap();
    let transport = TransportConfig {
        timeout: Duration::from_millis(50),
        ..TransportConfig::default()
    };
    let client = ScoringClient::new(Some(&origin), &transport).unwrap();

    let err = client.analyze("whatever").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got: {err:?}");
}
