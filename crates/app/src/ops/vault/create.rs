use clap::Args;

use basin_vault::ApiError;
use common::prelude::Account;

use crate::op::ContextError;

/// Create the configured vault, owned by ACCOUNT
#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Owner account (defaults to the account of the configured private key)
    #[arg(long)]
    pub account: Option<Account>,

    /// Cache window in minutes (defaults to the config value; omitted if unset)
    #[arg(long)]
    pub cache: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum VaultCreateError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::op::Op for Create {
    type Error = VaultCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let vault_id = ctx.vault_id()?;
        let account = match self.account {
            Some(account) => account,
            None => ctx.signer()?.account(),
        };
        let cache = self.cache.or(ctx.config.cache_minutes);

        tracing::info!(%vault_id, %account, ?cache, "creating vault");
        let response = ctx.client.create_vault(vault_id, &account, cache).await?;

        Ok(format!(
            "Created vault '{}' for account {}\nResponse: {}",
            vault_id, account, response
        ))
    }
}
