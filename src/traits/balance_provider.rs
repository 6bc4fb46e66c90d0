use async_trait::async_trait;

/// Source of native balances for a wallet
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Fetch the raw balance of `address` in lamports.
    ///
    /// The address is passed through as received from the wallet; a
    /// malformed address is reported as an error from this call.
    async fn get_balance(&self, address: &str) -> anyhow::Result<u64>;
}
