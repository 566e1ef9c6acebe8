use clap::Args;

use basin_vault::ApiError;

use crate::op::ContextError;

/// List events committed to the configured vault
#[derive(Args, Debug, Clone)]
pub struct List {
    /// Print the response body as returned by the service
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum EventsListError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::op::Op for List {
    type Error = EventsListError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let vault_id = ctx.vault_id()?;

        if self.raw {
            return Ok(ctx.client.list_events_raw(vault_id).await?);
        }

        let events = ctx.client.list_events(vault_id).await?;
        if events.is_empty() {
            return Ok(format!("No events in vault '{}'", vault_id));
        }

        let lines: Vec<String> = events.iter().map(|event| event.to_string()).collect();
        Ok(format!("Events:\n{}", lines.join("\n\n")))
    }
}
