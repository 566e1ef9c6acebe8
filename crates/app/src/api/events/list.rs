use reqwest::{Client, RequestBuilder, Response, Url};

use common::prelude::{Event, VaultId};

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// `GET /vaults/{vault_id}/events`
#[derive(Debug, Clone)]
pub struct ListEventsRequest {
    pub vault_id: VaultId,
}

#[async_trait::async_trait]
impl ApiRequest for ListEventsRequest {
    type Response = Vec<Event>;

    fn build_request(&self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["vaults", self.vault_id.as_str(), "events"])?;
        Ok(client.get(full_url))
    }

    async fn parse_response(&self, response: Response) -> Result<Self::Response, ApiError> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
