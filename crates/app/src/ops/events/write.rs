use std::path::PathBuf;

use clap::Args;
use time::OffsetDateTime;

use basin_vault::ApiError;
use common::prelude::{KeyError, Signature};

use crate::op::ContextError;
use crate::ops::Sign;

/// Sign FILE and write it to the configured vault
#[derive(Args, Debug, Clone)]
pub struct Write {
    /// File to upload
    #[arg(long)]
    pub file: PathBuf,

    /// Submission time in unix seconds (defaults to now)
    #[arg(long)]
    pub timestamp: Option<i64>,

    /// Precomputed signature hex (computed from the private key if omitted)
    #[arg(long)]
    pub signature: Option<Signature>,

    /// Sign a digest of the file's bytes instead of its name
    #[arg(long, conflicts_with = "signature")]
    pub sign_content: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum EventsWriteError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("signing failed: {0}")]
    Key(#[from] KeyError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::op::Op for Write {
    type Error = EventsWriteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let vault_id = ctx.vault_id()?;
        let signature = match self.signature {
            Some(signature) => signature,
            None => ctx
                .signer()?
                .sign_file(&self.file, Sign::target(self.sign_content))?,
        };
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp());

        tracing::info!(%vault_id, file = %self.file.display(), timestamp, "writing event");
        let response = ctx
            .client
            .write_event(vault_id, &self.file, timestamp, &signature)
            .await?;

        Ok(format!(
            "Wrote {} to vault '{}' at {}\nResponse: {}",
            self.file.display(),
            vault_id,
            timestamp,
            response
        ))
    }
}
