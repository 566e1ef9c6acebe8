//! End-to-end submission sequence against a mock vault service

mod common;

use std::time::Duration;

use basin_vault::pipeline::{run, RunError, RunPlan};
use basin_vault::PollConfig;
use ::common::prelude::SignatureTarget;
use wiremock::matchers::{body_bytes, body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const TIMESTAMP: i64 = 1700000000;

fn plan(temp: &std::path::Path, timeout_ms: u64) -> RunPlan {
    RunPlan {
        vault_id: common::vault_id("v1"),
        file: common::write_file(temp, "test.txt", common::PAYLOAD),
        output: temp.join("test-download.txt"),
        cache_minutes: Some(10800),
        signature_target: SignatureTarget::FileName,
        poll: PollConfig {
            timeout: Duration::from_millis(timeout_ms),
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(20),
        },
        timestamp: Some(TIMESTAMP),
    }
}

#[tokio::test]
async fn test_full_round_trip() {
    let (server, client, signer, temp) = common::setup_test_env().await;
    let plan = plan(temp.path(), 5_000);

    Mock::given(method("POST"))
        .and(path("/vaults/v1"))
        .and(body_string(format!(
            "account={}&cache=10800",
            common::DEV_ACCOUNT
        )))
        .respond_with(ResponseTemplate::new(201).set_body_string("vault created"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/vaults/v1/events"))
        .and(query_param("timestamp", TIMESTAMP.to_string()))
        .and(header("filename", "test.txt"))
        .and(body_bytes(common::PAYLOAD))
        .and(common::SignedBy(signer.account()))
        .respond_with(ResponseTemplate::new(200).set_body_string("event accepted"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vaults/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vaults/v1/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::events_json(&[("bafy123", TIMESTAMP)])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events/bafy123"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(common::PAYLOAD))
        .expect(1)
        .mount(&server)
        .await;

    let report = run(&client, &signer, &plan).await.unwrap();

    assert_eq!(report.account.to_hex(), common::DEV_ACCOUNT);
    assert_eq!(report.create_response, "vault created");
    assert_eq!(report.write_response, "event accepted");
    assert_eq!(report.timestamp, TIMESTAMP);
    assert_eq!(report.event.cid, "bafy123");
    assert_eq!(report.downloaded_bytes, 37);
    assert_eq!(std::fs::read(&plan.output).unwrap(), common::PAYLOAD);
    assert!(signer
        .account()
        .verify(b"test.txt", &report.signature)
        .is_ok());
}

#[tokio::test]
async fn test_create_failure_stops_before_write() {
    let (server, client, signer, temp) = common::setup_test_env().await;
    let plan = plan(temp.path(), 1_000);

    Mock::given(method("POST"))
        .and(path("/vaults/v1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vaults/v1/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run(&client, &signer, &plan).await.unwrap_err();
    assert!(matches!(err, RunError::Api(_)));
    assert!(!plan.output.exists());
}

#[tokio::test]
async fn test_never_listed_skips_download() {
    let (server, client, signer, temp) = common::setup_test_env().await;
    let plan = plan(temp.path(), 100);

    Mock::given(method("POST"))
        .and(path("/vaults/v1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vaults/v1/events"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vaults/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events/bafy123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run(&client, &signer, &plan).await.unwrap_err();
    assert!(matches!(err, RunError::NotYetIngested { .. }));
    assert!(!plan.output.exists());
}

#[tokio::test]
async fn test_missing_file_fails_before_any_request() {
    let (server, client, signer, temp) = common::setup_test_env().await;
    let mut plan = plan(temp.path(), 100);
    plan.file = temp.path().join("missing.txt");
    plan.signature_target = SignatureTarget::FileContent;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run(&client, &signer, &plan).await.unwrap_err();
    assert!(matches!(err, RunError::Key(_)));
}
