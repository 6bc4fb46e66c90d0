//! Runtime configuration for the dashboard host.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file. The library core never reads the environment itself.

use anyhow::Context;
use solana_commitment_config::{CommitmentConfig, CommitmentLevel};
use tracing::level_filters::LevelFilter;

use crate::models::{Cluster, NetworkLabel};
use crate::providers::DEFAULT_SOL_PRICE_USD;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub cluster: Cluster,
    pub rpc_url: String,
    pub network: NetworkLabel,
    pub commitment: CommitmentConfig,
    pub sol_price_usd: f64,
    pub wallet_address: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let cluster = Cluster::default();
        Self {
            rpc_url: cluster.rpc_url().to_string(),
            network: cluster.label(),
            cluster,
            commitment: CommitmentConfig::finalized(),
            sol_price_usd: DEFAULT_SOL_PRICE_USD,
            wallet_address: None,
            log_level: LevelFilter::INFO,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let named_cluster = get("SOLANA_CLUSTER")
            .map(|value| value.parse::<Cluster>())
            .transpose()
            .context("Invalid SOLANA_CLUSTER")?;

        let (cluster, rpc_url) = match (named_cluster, get("SOLANA_RPC_URL")) {
            (Some(cluster), Some(url)) => (cluster, url),
            (Some(cluster), None) => {
                let url = cluster.rpc_url().to_string();
                (cluster, url)
            }
            (None, Some(url)) => (Cluster::Custom(url.clone()), url),
            (None, None) => {
                let cluster = Cluster::default();
                let url = cluster.rpc_url().to_string();
                (cluster, url)
            }
        };

        let commitment = match get("SOLANA_COMMITMENT") {
            Some(value) => CommitmentConfig {
                commitment: value
                    .parse::<CommitmentLevel>()
                    .map_err(|_| anyhow::anyhow!("Invalid SOLANA_COMMITMENT: {}", value))?,
            },
            None => CommitmentConfig::finalized(),
        };

        let sol_price_usd = match get("SOL_PRICE_USD") {
            Some(value) => {
                let price: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid SOL_PRICE_USD: {}", value))?;
                if !price.is_finite() || price < 0.0 {
                    anyhow::bail!("SOL_PRICE_USD must be a non-negative number, got {}", value);
                }
                price
            }
            None => DEFAULT_SOL_PRICE_USD,
        };

        let log_level = match get("RUST_LOG_LEVEL") {
            Some(value) => value
                .parse::<LevelFilter>()
                .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG_LEVEL {}: {}", value, e))?,
            None => LevelFilter::INFO,
        };

        Ok(Self {
            network: cluster.label(),
            cluster,
            rpc_url,
            commitment,
            sol_price_usd,
            wallet_address: get("WALLET_ADDRESS"),
            log_level,
        })
    }
}
