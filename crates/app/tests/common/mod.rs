//! Shared test utilities for vault client integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use basin_vault::VaultClient;
use ::common::prelude::{Account, Signature, Signer, VaultId};
use tempfile::TempDir;
use url::Url;
use wiremock::{Match, MockServer, Request};

/// Well-known development key (hardhat account #0)
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// 37 bytes
pub const PAYLOAD: &[u8] = b"basin vault end-to-end test payload!\n";

/// Start a mock vault service and a client pointed at it
pub async fn setup_test_env() -> (MockServer, VaultClient, Signer, TempDir) {
    let server = MockServer::start().await;
    let remote = Url::parse(&server.uri()).unwrap();
    let client = VaultClient::new(&remote).unwrap();
    let signer = Signer::from_hex(DEV_KEY).unwrap();
    let temp_dir = TempDir::new().unwrap();
    (server, client, signer, temp_dir)
}

pub fn vault_id(id: &str) -> VaultId {
    VaultId::new(id).unwrap()
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn events_json(events: &[(&str, i64)]) -> serde_json::Value {
    serde_json::Value::Array(
        events
            .iter()
            .map(|(cid, timestamp)| {
                serde_json::json!({
                    "cid": cid,
                    "timestamp": timestamp,
                    "is_archived": false,
                    "cache_expiry": "2024-01-01T00:00:00Z",
                })
            })
            .collect(),
    )
}

/// Matches writes whose `signature` query parameter recovers to `account`
/// over the `filename` header, the way the vault service checks them.
pub struct SignedBy(pub Account);

impl Match for SignedBy {
    fn matches(&self, request: &Request) -> bool {
        let Some(filename) = request
            .headers
            .get("filename")
            .and_then(|value| value.to_str().ok())
        else {
            return false;
        };
        let Some(signature) = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "signature")
            .and_then(|(_, value)| value.parse::<Signature>().ok())
        else {
            return false;
        };
        self.0.verify(filename.as_bytes(), &signature).is_ok()
    }
}
