use clap::Args;

use crate::op::ContextError;

/// Print the account derived from the configured private key
#[derive(Args, Debug, Clone)]
pub struct Account {}

#[async_trait::async_trait]
impl crate::op::Op for Account {
    type Error = ContextError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(ctx.signer()?.account().to_string())
    }
}
