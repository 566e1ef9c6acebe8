use std::path::{Path, PathBuf};

use reqwest::{Client, RequestBuilder, Response, Url};
use tokio::io::AsyncWriteExt;

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// `GET /events/{cid}`, streamed into `output`
#[derive(Debug, Clone)]
pub struct DownloadEventRequest {
    pub cid: String,
    pub output: PathBuf,
}

impl DownloadEventRequest {
    /// Sibling of `output` the body is streamed into before being moved
    /// into place.
    fn partial_path(&self) -> Result<PathBuf, ApiError> {
        let name = self.output.file_name().ok_or_else(|| {
            ApiError::InvalidRequest(format!(
                "output path {} has no file name",
                self.output.display()
            ))
        })?;
        let mut partial = name.to_os_string();
        partial.push(".part");
        Ok(self.output.with_file_name(partial))
    }
}

#[async_trait::async_trait]
impl ApiRequest for DownloadEventRequest {
    type Response = u64;

    fn build_request(&self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        if self.cid.trim().is_empty() {
            return Err(ApiError::InvalidRequest("cid cannot be empty".into()));
        }
        self.partial_path()?;

        let full_url = endpoint(base_url, &["events", self.cid.as_str()])?;
        Ok(client.get(full_url))
    }

    async fn parse_response(&self, mut response: Response) -> Result<Self::Response, ApiError> {
        let partial = self.partial_path()?;

        let written = match stream_to_file(&mut response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                remove_partial(&partial).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&partial, &self.output).await {
            remove_partial(&partial).await;
            return Err(ApiError::file_io(&self.output, e));
        }

        tracing::debug!(cid = %self.cid, output = %self.output.display(), written, "event downloaded");
        Ok(written)
    }
}

async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial download");
        }
    }
}

async fn stream_to_file(response: &mut Response, path: &Path) -> Result<u64, ApiError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| ApiError::file_io(path, e))?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| ApiError::file_io(path, e))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| ApiError::file_io(path, e))?;

    Ok(written)
}
