use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use tracing::debug;

use crate::traits::balance_provider::BalanceProvider;
use crate::utils::helper::parse_pubkey;

/// RPC-based balance provider
pub struct RpcBalanceProvider {
    rpc_client: Arc<RpcClient>,
}

impl RpcBalanceProvider {
    /// Create a new RPC balance provider
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        let client = RpcClient::new_with_commitment(rpc_url, commitment);

        Self {
            rpc_client: Arc::new(client),
        }
    }

    /// Endpoint this provider talks to
    pub fn rpc_url(&self) -> String {
        self.rpc_client.url()
    }
}

#[async_trait]
impl BalanceProvider for RpcBalanceProvider {
    async fn get_balance(&self, address: &str) -> anyhow::Result<u64> {
        let wallet = parse_pubkey(address)?;
        let lamports = self.rpc_client.get_balance(&wallet).await?;
        debug!("Raw balance for {}: {} lamports", wallet, lamports);
        Ok(lamports)
    }
}
