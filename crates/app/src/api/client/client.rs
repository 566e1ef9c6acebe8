use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use common::prelude::{Account, Event, Signature, VaultId};

use super::error::ApiError;
use super::{ApiRequest, Raw};
use crate::api::events::{DownloadEventRequest, ListEventsRequest, WriteEventRequest};
use crate::api::vaults::CreateVaultRequest;

const USER_AGENT: &str = concat!("basin/", env!("CARGO_PKG_VERSION"));

/// Client for the vault service REST API.
///
/// Holds nothing but the base URL and a connection pool; every operation
/// is an independent request. Non-2xx responses are surfaced as
/// [`ApiError::HttpStatus`] carrying the status and response body.
#[derive(Debug, Clone)]
pub struct VaultClient {
    pub remote: Url,
    client: Client,
}

impl VaultClient {
    pub fn new(remote: &Url) -> Result<Self, ApiError> {
        Self::with_timeout(remote, None)
    }

    /// Build a client whose requests give up after `timeout`.
    pub fn with_timeout(remote: &Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    /// Send `request`, check the status, and hand the response to the
    /// request's parser.
    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.remote, &self.client)?;
        let response = request_builder.send().await?;

        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "vault response");

        if status.is_success() {
            request.parse_response(response).await
        } else {
            Err(ApiError::HttpStatus(status, response.text().await?))
        }
    }

    /// Register `vault_id` as owned by `account`.
    ///
    /// `cache_minutes` controls how long ingested content stays in the
    /// fast cache; the field is left out of the form entirely when `None`.
    /// Returns the raw response body.
    pub async fn create_vault(
        &self,
        vault_id: &VaultId,
        account: &Account,
        cache_minutes: Option<u32>,
    ) -> Result<String, ApiError> {
        self.call(CreateVaultRequest {
            vault_id: vault_id.clone(),
            account: *account,
            cache_minutes,
        })
        .await
    }

    /// Upload the file at `file_path` as a new event in `vault_id`.
    ///
    /// Returns the raw ingestion response text.
    pub async fn write_event(
        &self,
        vault_id: &VaultId,
        file_path: &Path,
        timestamp: i64,
        signature: &Signature,
    ) -> Result<String, ApiError> {
        let request =
            WriteEventRequest::from_file(vault_id.clone(), file_path, timestamp, *signature).await?;
        self.call(request).await
    }

    /// Events committed to `vault_id`, in the order the service returns them.
    pub async fn list_events(&self, vault_id: &VaultId) -> Result<Vec<Event>, ApiError> {
        self.call(ListEventsRequest {
            vault_id: vault_id.clone(),
        })
        .await
    }

    /// Undecoded body of the list endpoint, for diagnostics.
    pub async fn list_events_raw(&self, vault_id: &VaultId) -> Result<String, ApiError> {
        self.call(Raw(ListEventsRequest {
            vault_id: vault_id.clone(),
        }))
        .await
    }

    /// Fetch the content for `cid` into `output_path`, returning the
    /// number of bytes written.
    ///
    /// Nothing is written unless the service answers with a 2xx status,
    /// and an interrupted transfer leaves `output_path` untouched.
    pub async fn download_event(&self, cid: &str, output_path: &Path) -> Result<u64, ApiError> {
        self.call(DownloadEventRequest {
            cid: cid.to_string(),
            output: output_path.to_path_buf(),
        })
        .await
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}
