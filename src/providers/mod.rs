//! Providers backing the dashboard's balance and price reads

pub mod rpc_provider;
pub mod price_provider;

// Re-export for convenience
pub use rpc_provider::RpcBalanceProvider;
pub use price_provider::{FixedPriceProvider, DEFAULT_SOL_PRICE_USD};
