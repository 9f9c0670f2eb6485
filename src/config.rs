//! Squadbot configuration
//!
//! Configuration is environment-only: the bot token comes from `BOT_TOKEN`
//! and the RPC endpoint from `SOLANA_RPC_URL` (devnet by default). No config
//! files are read or written.

use crate::error::{Error, Result};
use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Default RPC endpoint (Solana devnet)
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Lamports airdropped to the creator before submitting the creation transaction
pub const AIRDROP_LAMPORTS: u64 = 2 * LAMPORTS_PER_SOL;

/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Environment variable overriding the RPC endpoint
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub bot_token: String,

    /// Worker configuration, inherited by every creation request
    pub worker: WorkerConfig,
}

/// Multisig worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Airdrop amount for the freshly generated creator
    pub airdrop_lamports: u64,
}

impl BotConfig {
    /// Resolve the bot configuration from the environment.
    ///
    /// A missing `BOT_TOKEN` is a startup error; the caller is expected to
    /// log it and exit non-zero.
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var(BOT_TOKEN_ENV)
            .map_err(|_| Error::Config(format!("Missing {} env var", BOT_TOKEN_ENV)))?;
        if bot_token.is_empty() {
            return Err(Error::Config(format!("Missing {} env var", BOT_TOKEN_ENV)));
        }

        Ok(Self {
            bot_token,
            worker: WorkerConfig::from_env(),
        })
    }
}

impl WorkerConfig {
    /// Resolve the worker configuration from the environment.
    ///
    /// The worker never reads the bot token, so this cannot fail: every
    /// setting has a default.
    pub fn from_env() -> Self {
        let rpc_url = std::env::var(RPC_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEVNET_RPC_URL.to_string());

        Self {
            rpc_url,
            airdrop_lamports: AIRDROP_LAMPORTS,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            airdrop_lamports: AIRDROP_LAMPORTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_config_default() {
        let config = WorkerConfig::default();
        assert_eq!(config.rpc_url, DEVNET_RPC_URL);
        assert_eq!(config.airdrop_lamports, 2 * LAMPORTS_PER_SOL);
    }
}
