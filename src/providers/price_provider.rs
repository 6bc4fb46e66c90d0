use async_trait::async_trait;
use tracing::debug;

use crate::traits::price_provider::PriceProvider;

/// Placeholder SOL price in USD used when nothing else is configured
pub const DEFAULT_SOL_PRICE_USD: f64 = 150.0;

/// Price provider that always quotes the same SOL price.
///
/// This is not a price feed. It keeps the dashboard's valuation
/// deterministic until a real oracle is wired in.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriceProvider {
    sol_price: f64,
}

impl FixedPriceProvider {
    /// Create a new fixed price provider
    pub fn new(sol_price: f64) -> Self {
        Self { sol_price }
    }
}

impl Default for FixedPriceProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SOL_PRICE_USD)
    }
}

#[async_trait]
impl PriceProvider for FixedPriceProvider {
    async fn get_sol_price(&self) -> Option<f64> {
        debug!("Using placeholder SOL price: ${}", self.sol_price);
        Some(self.sol_price)
    }
}
