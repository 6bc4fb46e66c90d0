//! Data models for the portfolio dashboard

pub mod connection;
pub mod token;
pub mod portfolio;

// Re-export for convenience
pub use connection::{Cluster, ConnectionHandle, NetworkLabel};
pub use token::TokenEntry;
pub use portfolio::PortfolioSnapshot;
