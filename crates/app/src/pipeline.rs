//! The full submission sequence: create the vault, sign and write a file,
//! wait for the write to be listed, then download what was stored.
//!
//! Every step is fatal on error and nothing is rolled back; a vault created
//! in step one stays created if the write fails.

use std::path::PathBuf;
use std::time::Duration;

use time::OffsetDateTime;

use common::prelude::{Account, Event, KeyError, Signature, SignatureTarget, Signer, VaultId};

use crate::api::client::{ApiError, VaultClient};
use crate::ingest::{wait_for_ingestion, IngestOutcome, PollConfig, PollTarget};

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub vault_id: VaultId,
    /// File to sign and upload
    pub file: PathBuf,
    /// Where the downloaded copy goes
    pub output: PathBuf,
    pub cache_minutes: Option<u32>,
    pub signature_target: SignatureTarget,
    pub poll: PollConfig,
    /// Submission time; defaults to the current time
    pub timestamp: Option<i64>,
}

/// Everything the sequence observed, step by step
#[derive(Debug, Clone)]
pub struct RunReport {
    pub account: Account,
    pub signature: Signature,
    pub create_response: String,
    pub timestamp: i64,
    pub write_response: String,
    pub events: Vec<Event>,
    pub event: Event,
    pub downloaded_bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("signing failed: {0}")]
    Key(#[from] KeyError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("event not listed after {attempts} attempts over {timeout:?}")]
    NotYetIngested { attempts: u32, timeout: Duration },
}

/// Run sign, create, write, poll and download for `plan`.
pub async fn run(
    client: &VaultClient,
    signer: &Signer,
    plan: &RunPlan,
) -> Result<RunReport, RunError> {
    let account = signer.account();

    let signature = signer.sign_file(&plan.file, plan.signature_target)?;
    tracing::info!(file = %plan.file.display(), target = ?plan.signature_target, "signed file");

    tracing::info!(vault_id = %plan.vault_id, %account, cache = ?plan.cache_minutes, "creating vault");
    let create_response = client
        .create_vault(&plan.vault_id, &account, plan.cache_minutes)
        .await?;

    let timestamp = plan
        .timestamp
        .unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp());
    tracing::info!(vault_id = %plan.vault_id, timestamp, "writing event");
    let write_response = client
        .write_event(&plan.vault_id, &plan.file, timestamp, &signature)
        .await?;

    let target = PollTarget::Timestamp(timestamp);
    let (event, events) =
        match wait_for_ingestion(client, &plan.vault_id, &target, &plan.poll).await? {
            IngestOutcome::Ingested { event, events } => (event, events),
            IngestOutcome::NotYetIngested { attempts, .. } => {
                return Err(RunError::NotYetIngested {
                    attempts,
                    timeout: plan.poll.timeout,
                })
            }
        };

    tracing::info!(cid = %event.cid, output = %plan.output.display(), "downloading event");
    let downloaded_bytes = client.download_event(&event.cid, &plan.output).await?;

    Ok(RunReport {
        account,
        signature,
        create_response,
        timestamp,
        write_response,
        events,
        event,
        downloaded_bytes,
    })
}
