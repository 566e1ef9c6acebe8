// Vault service client: request types, executor and ingestion polling
pub mod api;
pub mod ingest;
pub mod pipeline;

// App state (configuration, paths)
pub mod state;

pub use api::client::{ApiError, ApiRequest, VaultClient};
pub use ingest::{wait_for_ingestion, IngestOutcome, PollConfig, PollTarget};
pub use pipeline::{RunError, RunPlan, RunReport};
pub use state::{AppConfig, AppState, StateError};
