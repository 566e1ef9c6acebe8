pub use clap::Parser;

use std::path::PathBuf;

use common::prelude::VaultId;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "basin")]
#[command(about = "Sign files and write them as events to a basin vault")]
#[command(version)]
pub struct Args {
    /// Vault service base URL (defaults to the config file value, then https://basin.tableland.xyz)
    #[arg(long, global = true, env = "BASIN_REMOTE")]
    pub remote: Option<Url>,

    /// Path to the basin config directory (defaults to ~/.basin)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Hex encoded secp256k1 private key that owns the vault
    #[arg(long, global = true, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Vault to operate on
    #[arg(long, global = true, env = "VAULT_ID")]
    pub vault_id: Option<VaultId>,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: crate::Command,
}
