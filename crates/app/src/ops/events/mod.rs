use clap::{Args, Subcommand};

pub mod download;
pub mod list;
pub mod write;

use crate::op::Op;

crate::command_enum! {
    (Write, write::Write),
    (List, list::List),
    (Download, download::Download),
}

// Rename the generated Command to EventsCommand for clarity
pub type EventsCommand = Command;

/// Write, list and download vault events
#[derive(Args, Debug, Clone)]
pub struct Events {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[async_trait::async_trait]
impl Op for Events {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
