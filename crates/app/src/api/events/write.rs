use std::path::Path;

use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};

use common::crypto::file_name;
use common::prelude::{Signature, VaultId};

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// Header carrying the submitted file's base name
pub const FILENAME_HEADER: &str = "filename";

/// `POST /vaults/{vault_id}/events?timestamp=..&signature=..`
///
/// The body is the raw file content.
#[derive(Debug, Clone)]
pub struct WriteEventRequest {
    pub vault_id: VaultId,
    pub filename: String,
    pub body: Bytes,
    /// Submission time, unix seconds
    pub timestamp: i64,
    pub signature: Signature,
}

impl WriteEventRequest {
    /// Read `path` fully and build a write for it.
    pub async fn from_file(
        vault_id: VaultId,
        path: &Path,
        timestamp: i64,
        signature: Signature,
    ) -> Result<Self, ApiError> {
        let filename = file_name(path)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?
            .to_string();
        let body = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::file_io(path, e))?;

        Ok(Self {
            vault_id,
            filename,
            body: Bytes::from(body),
            timestamp,
            signature,
        })
    }
}

#[async_trait::async_trait]
impl ApiRequest for WriteEventRequest {
    type Response = String;

    fn build_request(&self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["vaults", self.vault_id.as_str(), "events"])?;
        let filename = HeaderValue::from_str(&self.filename).map_err(|_| {
            ApiError::InvalidRequest(format!(
                "file name {:?} is not a valid header value",
                self.filename
            ))
        })?;

        tracing::debug!(
            url = %full_url,
            filename = %self.filename,
            size = self.body.len(),
            timestamp = self.timestamp,
            "write event"
        );

        Ok(client
            .post(full_url)
            .query(&[
                ("timestamp", self.timestamp.to_string()),
                ("signature", self.signature.to_hex()),
            ])
            .header(FILENAME_HEADER, filename)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(self.body.clone()))
    }

    async fn parse_response(&self, response: Response) -> Result<Self::Response, ApiError> {
        Ok(response.text().await?)
    }
}
