//! Core traits for the portfolio dashboard

pub mod balance_provider;
pub mod price_provider;
pub mod event_handler;

// Re-export for convenience
pub use balance_provider::BalanceProvider;
pub use price_provider::PriceProvider;
pub use event_handler::DashboardEventHandler;
