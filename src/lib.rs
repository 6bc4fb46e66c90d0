//! Solana Portfolio Dashboard Library
//!
//! Shows the native balance of a connected Solana wallet together with a
//! placeholder token list and a toy USD valuation. The crate models the
//! fetch lifecycle behind the dashboard (disconnected, loading, loaded or
//! failed) and leaves the wallet connection, the RPC transport and the
//! render surface behind traits.

// Public modules - these are the API surface
pub mod config;
pub mod models;
pub mod traits;
pub mod providers;
pub mod handlers;
pub mod dashboard;
pub mod utils;

// Re-export commonly used items for easier access
pub use config::DashboardConfig;
pub use models::{
    connection::{Cluster, ConnectionHandle, NetworkLabel},
    token::TokenEntry,
    portfolio::PortfolioSnapshot,
};
pub use traits::{
    balance_provider::BalanceProvider,
    price_provider::PriceProvider,
    event_handler::DashboardEventHandler,
};
pub use providers::{
    rpc_provider::RpcBalanceProvider,
    price_provider::FixedPriceProvider,
};
pub use handlers::{
    console::ConsoleEventHandler,
    composite::CompositeEventHandler,
};
pub use dashboard::{
    fetcher::PortfolioFetcher,
    portfolio_dashboard::{ConnectionUpdate, PortfolioDashboard},
    renderer::{render, DashboardView},
    state::{FetchStatus, PendingFetch, RefreshOutcome, ViewState},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
