use std::path::PathBuf;

use clap::Args;

use common::prelude::{KeyError, SignatureTarget};

use crate::op::ContextError;

/// Print the signature a write of FILE would carry
#[derive(Args, Debug, Clone)]
pub struct Sign {
    /// File to sign
    #[arg(long)]
    pub file: PathBuf,

    /// Sign a digest of the file's bytes instead of its name.
    /// Only use this against services that verify content digests.
    #[arg(long)]
    pub sign_content: bool,
}

impl Sign {
    pub fn target(sign_content: bool) -> SignatureTarget {
        if sign_content {
            SignatureTarget::FileContent
        } else {
            SignatureTarget::FileName
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("signing failed: {0}")]
    Key(#[from] KeyError),
}

#[async_trait::async_trait]
impl crate::op::Op for Sign {
    type Error = SignError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let signer = ctx.signer()?;
        let signature = signer.sign_file(&self.file, Self::target(self.sign_content))?;
        Ok(signature.to_hex())
    }
}
