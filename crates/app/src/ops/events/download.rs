use std::path::PathBuf;

use clap::Args;

use basin_vault::ApiError;

/// Download an event's content by CID
#[derive(Args, Debug, Clone)]
pub struct Download {
    /// Content identifier of the event
    #[arg(long)]
    pub cid: String,

    /// Where to write the content (replaced if it exists)
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum EventsDownloadError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::op::Op for Download {
    type Error = EventsDownloadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        tracing::info!(cid = %self.cid, output = %self.output.display(), "downloading event");
        let written = ctx.client.download_event(&self.cid, &self.output).await?;

        Ok(format!(
            "Downloaded event '{}' ({} bytes) to {}",
            self.cid,
            written,
            self.output.display()
        ))
    }
}
