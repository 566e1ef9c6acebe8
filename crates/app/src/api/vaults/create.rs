use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;

use common::prelude::{Account, VaultId};

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// `POST /vaults/{vault_id}`, form encoded
#[derive(Debug, Clone, Serialize)]
pub struct CreateVaultRequest {
    #[serde(skip)]
    pub vault_id: VaultId,
    /// Owner of the new vault
    pub account: Account,
    /// Cache retention window in minutes
    #[serde(rename = "cache", skip_serializing_if = "Option::is_none")]
    pub cache_minutes: Option<u32>,
}

#[async_trait::async_trait]
impl ApiRequest for CreateVaultRequest {
    type Response = String;

    fn build_request(&self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["vaults", self.vault_id.as_str()])?;
        tracing::debug!(url = %full_url, account = %self.account, cache = ?self.cache_minutes, "create vault");
        Ok(client.post(full_url).form(self))
    }

    async fn parse_response(&self, response: Response) -> Result<Self::Response, ApiError> {
        Ok(response.text().await?)
    }
}
