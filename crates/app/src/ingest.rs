//! Waiting for a write to become visible in a vault.
//!
//! The service ingests writes asynchronously, so an event may not show up
//! in the list endpoint right after the write returns. [`wait_for_ingestion`]
//! polls the list endpoint with a doubling interval until the expected
//! event appears or the deadline passes.

use std::time::Duration;

use tokio::time::Instant;

use common::prelude::{Event, VaultId};

use crate::api::client::{ApiError, VaultClient};

/// How to recognize the event a write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollTarget {
    /// An event with this content identifier
    Cid(String),
    /// An event submitted with this unix timestamp
    Timestamp(i64),
}

impl PollTarget {
    pub fn find<'a>(&self, events: &'a [Event]) -> Option<&'a Event> {
        events.iter().find(|event| match self {
            PollTarget::Cid(cid) => event.cid == *cid,
            PollTarget::Timestamp(timestamp) => event.timestamp == *timestamp,
        })
    }
}

impl std::fmt::Display for PollTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollTarget::Cid(cid) => write!(f, "cid {}", cid),
            PollTarget::Timestamp(timestamp) => write!(f, "timestamp {}", timestamp),
        }
    }
}

/// Shortest delay between list attempts, whatever the config says
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Total time to keep polling
    pub timeout: Duration,
    /// Delay after the first miss, raised to [`MIN_POLL_INTERVAL`] if lower
    pub initial_interval: Duration,
    /// Upper bound for the doubling delay
    pub max_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The target showed up; `events` is the full listing it was found in.
    Ingested { event: Event, events: Vec<Event> },
    /// The deadline passed first; `last_seen` is the final listing.
    NotYetIngested { attempts: u32, last_seen: Vec<Event> },
}

/// Poll `vault_id` until `target` is listed or `config.timeout` elapses.
///
/// The list endpoint is always queried at least once. Errors from the
/// list call end the wait immediately. A timeout too large to represent
/// as a deadline means waiting until the event shows up.
pub async fn wait_for_ingestion(
    client: &VaultClient,
    vault_id: &VaultId,
    target: &PollTarget,
    config: &PollConfig,
) -> Result<IngestOutcome, ApiError> {
    let deadline = Instant::now().checked_add(config.timeout);
    let mut interval = config.initial_interval.max(MIN_POLL_INTERVAL);
    let max_interval = config.max_interval.max(interval);
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let events = client.list_events(vault_id).await?;

        if let Some(event) = target.find(&events) {
            tracing::info!(%vault_id, cid = %event.cid, attempts, "event ingested");
            return Ok(IngestOutcome::Ingested {
                event: event.clone(),
                events,
            });
        }

        let delay = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    tracing::warn!(%vault_id, %target, attempts, "gave up waiting for ingestion");
                    return Ok(IngestOutcome::NotYetIngested {
                        attempts,
                        last_seen: events,
                    });
                }
                interval.min(deadline - now)
            }
            None => interval,
        };

        tracing::debug!(%vault_id, %target, attempts, ?delay, "event not listed yet");
        tokio::time::sleep(delay).await;
        interval = interval.saturating_mul(2).min(max_interval);
    }
}
