use clap::Args;
use url::Url;

use basin_vault::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Vault service base URL to store in the config
    #[arg(long = "service-url")]
    pub service_url: Option<Url>,

    /// Default cache window for new vaults, in minutes
    #[arg(long)]
    pub cache_minutes: Option<u32>,

    /// Seconds to wait for a write to be listed
    #[arg(long)]
    pub poll_timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            remote: self.service_url.clone().unwrap_or(defaults.remote.clone()),
            cache_minutes: self.cache_minutes,
            poll_timeout_secs: self.poll_timeout_secs.unwrap_or(defaults.poll_timeout_secs),
            ..defaults
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let cache = match state.config.cache_minutes {
            Some(minutes) => format!("{} minutes", minutes),
            None => "service default".to_string(),
        };

        Ok(format!(
            "Initialized basin directory at: {}\n\
             - Config: {}\n\
             - Remote: {}\n\
             - Cache window: {}\n\
             - Poll timeout: {}s",
            state.basin_dir.display(),
            state.config_path.display(),
            state.config.remote,
            cache,
            state.config.poll_timeout_secs
        ))
    }
}
