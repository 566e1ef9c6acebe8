use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;

use basin_vault::pipeline::{self, RunError, RunPlan};

use crate::op::ContextError;
use crate::ops::Sign;

/// Create the vault, write FILE to it, wait for ingestion and download it back
#[derive(Args, Debug, Clone)]
pub struct Run {
    /// File to sign and upload
    #[arg(long)]
    pub file: PathBuf,

    /// Where to save the downloaded copy (defaults to <stem>-download.<ext>)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Cache window in minutes (defaults to the config value)
    #[arg(long)]
    pub cache: Option<u32>,

    /// Sign a digest of the file's bytes instead of its name
    #[arg(long)]
    pub sign_content: bool,

    /// Seconds to wait for the write to be listed (defaults to the config value)
    #[arg(long)]
    pub poll_timeout: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum RunOpError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Run(#[from] RunError),
}

/// `dir/name.ext` -> `name-download.ext` in the working directory
pub fn default_output(file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "event".to_string());
    match file.extension() {
        Some(ext) => PathBuf::from(format!("{}-download.{}", stem, ext.to_string_lossy())),
        None => PathBuf::from(format!("{}-download", stem)),
    }
}

#[async_trait::async_trait]
impl crate::op::Op for Run {
    type Error = RunOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let signer = ctx.signer()?;
        let vault_id = ctx.vault_id()?.clone();

        let mut poll = ctx.config.poll_config();
        if let Some(secs) = self.poll_timeout {
            poll.timeout = Duration::from_secs(secs);
        }

        let plan = RunPlan {
            vault_id,
            file: self.file.clone(),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| default_output(&self.file)),
            cache_minutes: self.cache.or(ctx.config.cache_minutes),
            signature_target: Sign::target(self.sign_content),
            poll,
            timestamp: None,
        };

        let report = pipeline::run(&ctx.client, &signer, &plan).await?;

        let mut lines = Vec::new();
        lines.push(format!("Signature: {}", report.signature));
        lines.push(format!(
            "Created vault '{}' for account: {}",
            plan.vault_id, report.account
        ));
        lines.push(format!("Create response: {}", report.create_response));
        lines.push(format!(
            "Wrote {} at {}",
            plan.file.display(),
            report.timestamp
        ));
        lines.push(format!("Write response: {}", report.write_response));
        lines.push("Events:".to_string());
        for event in &report.events {
            lines.push(event.to_string());
        }
        lines.push(format!(
            "Downloaded event '{}' ({} bytes) to {}",
            report.event.cid,
            report.downloaded_bytes,
            plan.output.display()
        ));

        Ok(lines.join("\n"))
    }
}
