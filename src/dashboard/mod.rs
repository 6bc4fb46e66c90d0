//! Fetch lifecycle, view state and rendering of the portfolio dashboard

pub mod state;
pub mod fetcher;
pub mod renderer;
pub mod portfolio_dashboard;

pub use state::{
    ConnectionChange, FetchFailed, FetchStatus, PendingFetch, RefreshOutcome, ViewState,
    FETCH_FAILED_MESSAGE,
};
pub use fetcher::PortfolioFetcher;
pub use renderer::{render, DashboardView};
pub use portfolio_dashboard::{ConnectionUpdate, PortfolioDashboard};
