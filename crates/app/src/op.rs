use std::error::Error;
use std::path::PathBuf;

use url::Url;

use basin_vault::state::{AppConfig, AppState, StateError};
use basin_vault::{ApiError, VaultClient};
use common::prelude::{KeyError, Signer, VaultId};

/// Resolve the remote URL for the vault client.
///
/// Priority: explicit `--remote` flag (or `BASIN_REMOTE`) > config file `remote` > default.
pub fn resolve_remote(explicit: Option<Url>, config: &AppConfig) -> Url {
    explicit.unwrap_or_else(|| config.remote.clone())
}

/// Load the config file if there is one, otherwise fall back to defaults.
///
/// Only a missing config falls back; an unreadable or malformed file is an error.
pub fn resolve_config(config_path: Option<PathBuf>) -> Result<AppConfig, StateError> {
    match AppState::load(config_path) {
        Ok(state) => Ok(state.config),
        Err(
            e @ (StateError::NotInitialized
            | StateError::MissingFile(_)
            | StateError::NoHomeDirectory),
        ) => {
            tracing::debug!(error = %e, "using default config");
            Ok(AppConfig::default())
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("no private key configured; set PRIVATE_KEY or pass --private-key")]
    MissingPrivateKey,
    #[error("no vault configured; set VAULT_ID or pass --vault-id")]
    MissingVaultId,
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("failed to load config: {0}")]
    Config(#[from] StateError),
    #[error("failed to create vault client: {0}")]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct OpContext {
    /// Vault client (always initialized with default or custom URL)
    pub client: VaultClient,
    /// Effective configuration
    pub config: AppConfig,
    /// Optional custom config path (defaults to ~/.basin)
    pub config_path: Option<PathBuf>,
    private_key: Option<String>,
    vault_id: Option<VaultId>,
}

impl OpContext {
    pub fn new(
        remote: Option<Url>,
        config_path: Option<PathBuf>,
        private_key: Option<String>,
        vault_id: Option<VaultId>,
    ) -> Result<Self, ContextError> {
        let config = resolve_config(config_path.clone())?;
        let remote = resolve_remote(remote, &config);
        let client = VaultClient::with_timeout(&remote, config.request_timeout())?;

        Ok(Self {
            client,
            config,
            config_path,
            private_key,
            vault_id,
        })
    }

    /// Build a signer from the configured private key.
    pub fn signer(&self) -> Result<Signer, ContextError> {
        let secret = self
            .private_key
            .as_deref()
            .ok_or(ContextError::MissingPrivateKey)?;
        Ok(Signer::from_hex(secret)?)
    }

    pub fn vault_id(&self) -> Result<&VaultId, ContextError> {
        self.vault_id.as_ref().ok_or(ContextError::MissingVaultId)
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_remote_explicit_wins() {
        let explicit = Url::parse("http://example.com:9999").unwrap();
        let result = resolve_remote(Some(explicit.clone()), &AppConfig::default());
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_resolve_remote_falls_back_to_config() {
        let config = AppConfig {
            remote: Url::parse("http://localhost:8080").unwrap(),
            ..AppConfig::default()
        };
        let result = resolve_remote(None, &config);
        assert_eq!(result.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_resolve_config_without_directory() {
        let config = resolve_config(Some(PathBuf::from("/nonexistent"))).unwrap();
        assert_eq!(config, AppConfig::default());

        let temp = tempfile::tempdir().unwrap();
        let config = resolve_config(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "remote = \"http://my-private-vault:8080\"\ncache_minutes = \"oops\"\n",
        )
        .unwrap();

        assert!(matches!(
            resolve_config(Some(temp.path().to_path_buf())),
            Err(StateError::TomlDe(_))
        ));
        assert!(matches!(
            OpContext::new(None, Some(temp.path().to_path_buf()), None, None),
            Err(ContextError::Config(StateError::TomlDe(_)))
        ));
    }

    #[test]
    fn test_config_remote_is_used() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "remote = \"http://my-private-vault:8080\"\n",
        )
        .unwrap();

        let ctx = OpContext::new(None, Some(temp.path().to_path_buf()), None, None).unwrap();
        assert_eq!(ctx.client.base_url().as_str(), "http://my-private-vault:8080/");
    }

    #[test]
    fn test_context_requires_key_and_vault() {
        let ctx = OpContext::new(None, Some(PathBuf::from("/nonexistent")), None, None).unwrap();
        assert!(matches!(ctx.signer(), Err(ContextError::MissingPrivateKey)));
        assert!(matches!(ctx.vault_id(), Err(ContextError::MissingVaultId)));

        let ctx = OpContext::new(
            None,
            Some(PathBuf::from("/nonexistent")),
            Some("not-hex".into()),
            Some(VaultId::new("v1").unwrap()),
        )
        .unwrap();
        assert!(matches!(ctx.signer(), Err(ContextError::Key(_))));
        assert_eq!(ctx.vault_id().unwrap().as_str(), "v1");
    }
}
