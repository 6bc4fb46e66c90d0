use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, warn};

use crate::models::{PortfolioSnapshot, TokenEntry};
use crate::traits::{BalanceProvider, PriceProvider};
use crate::utils::helper::{format_token_amount, lamports_to_sol};

/// Symbol of the chain's native asset
pub const NATIVE_SYMBOL: &str = "SOL";

/// Decimal places of the native asset (lamports per SOL = 10^9)
pub const NATIVE_DECIMALS: u8 = 9;

/// Turns one balance read into a display-ready portfolio snapshot
pub struct PortfolioFetcher {
    balance_provider: Arc<dyn BalanceProvider>,
    price_provider: Arc<dyn PriceProvider>,
}

impl PortfolioFetcher {
    /// Create a new portfolio fetcher
    pub fn new(
        balance_provider: Arc<dyn BalanceProvider>,
        price_provider: Arc<dyn PriceProvider>,
    ) -> Self {
        Self {
            balance_provider,
            price_provider,
        }
    }

    /// Fetch the portfolio of `address`.
    ///
    /// Issues exactly one balance read. The error carries the full cause
    /// for diagnostics; callers decide what the user gets to see.
    pub async fn fetch(&self, address: &str) -> anyhow::Result<PortfolioSnapshot> {
        let lamports = self
            .balance_provider
            .get_balance(address)
            .await
            .with_context(|| format!("Failed to fetch SOL balance for {}", address))?;

        let sol_price = self.price_provider.get_sol_price().await;
        if sol_price.is_none() {
            warn!("No SOL price available, valuing portfolio at $0");
        }

        let snapshot = build_snapshot(address, lamports, sol_price);
        debug!(
            "Fetched portfolio for {}: {} SOL, ${:.2}",
            address, snapshot.native_balance, snapshot.total_value_estimate
        );
        Ok(snapshot)
    }
}

/// Build the snapshot for a raw lamport balance.
///
/// The token list holds a single entry for the native asset, keyed by the
/// wallet address itself.
pub fn build_snapshot(address: &str, lamports: u64, sol_price: Option<f64>) -> PortfolioSnapshot {
    let sol_balance = lamports_to_sol(lamports);

    let native = TokenEntry::new(
        address,
        format_token_amount(sol_balance),
        NATIVE_DECIMALS,
        Some(NATIVE_SYMBOL.to_string()),
    );

    let total_value = sol_price.map(|price| sol_balance * price).unwrap_or(0.0);

    PortfolioSnapshot::new(sol_balance, vec![native], total_value)
}
