#[allow(clippy::module_inception)]
mod client;
mod error;

use reqwest::{Client, RequestBuilder, Response, Url};

pub use client::VaultClient;
pub use error::ApiError;

/// A single vault service operation.
///
/// Implementors know how to build their HTTP request against a base URL
/// and how to turn a successful (2xx) response into their output. Status
/// checking happens in [`VaultClient::call`] before `parse_response` runs.
#[async_trait::async_trait]
pub trait ApiRequest: Send + Sync {
    type Response: Send;

    fn build_request(&self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;

    async fn parse_response(&self, response: Response) -> Result<Self::Response, ApiError>;
}

/// Wraps a request so the successful body comes back as unparsed text.
#[derive(Debug, Clone)]
pub struct Raw<T>(pub T);

#[async_trait::async_trait]
impl<T: ApiRequest> ApiRequest for Raw<T> {
    type Response = String;

    fn build_request(&self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        self.0.build_request(base_url, client)
    }

    async fn parse_response(&self, response: Response) -> Result<Self::Response, ApiError> {
        Ok(response.text().await?)
    }
}

/// Append percent-encoded path `segments` to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("{} cannot be a base URL", base)))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}
