//! Pure mapping from the view state to one of the dashboard layouts.

use std::fmt;

use super::state::{FetchStatus, ViewState};
use crate::models::TokenEntry;
use crate::utils::helper::{format_balance, format_usd};

pub const DISCONNECTED_TITLE: &str = "Portfolio Dashboard - Please Connect Wallet";
pub const DISCONNECTED_WARNING: &str = "⚠️ WALLET CONNECTION REQUIRED - Please connect your Solana wallet to view your cryptocurrency portfolio";
pub const CONNECTED_TITLE: &str = "My Portfolio Dashboard for Cryptocurrency Assets";
pub const EMPTY_TOKENS_TEXT: &str = "No tokens found in wallet";
pub const REFRESH_LABEL: &str = "Refresh Portfolio Data";

/// A figure that is either known or still being fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Figure {
    Loading,
    Value(String),
}

impl Figure {
    pub fn value(&self) -> Option<&str> {
        match self {
            Figure::Value(text) => Some(text),
            Figure::Loading => None,
        }
    }
}

/// One line of the holdings card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub symbol: String,
    pub mint: String,
    pub amount: String,
}

impl From<&TokenEntry> for TokenRow {
    fn from(entry: &TokenEntry) -> Self {
        Self {
            symbol: entry.display_symbol().to_string(),
            mint: entry.mint().to_string(),
            amount: entry.display_amount().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectedLayout {
    pub title: &'static str,
    pub warning: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedLayout {
    pub title: &'static str,
    pub error_banner: Option<String>,
    pub balance: Figure,
    pub network_label: String,
    pub tokens: Vec<TokenRow>,
    pub total_value: Figure,
    pub refresh_enabled: bool,
}

/// Everything the render surface needs to draw the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Disconnected(DisconnectedLayout),
    Connected(ConnectedLayout),
}

impl DashboardView {
    pub fn is_disconnected(&self) -> bool {
        matches!(self, DashboardView::Disconnected(_))
    }

    pub fn connected(&self) -> Option<&ConnectedLayout> {
        match self {
            DashboardView::Connected(layout) => Some(layout),
            DashboardView::Disconnected(_) => None,
        }
    }
}

/// Derive the layout for `state`
pub fn render(state: &ViewState) -> DashboardView {
    let Some(connection) = state.connection() else {
        return DashboardView::Disconnected(DisconnectedLayout {
            title: DISCONNECTED_TITLE,
            warning: DISCONNECTED_WARNING,
        });
    };

    let snapshot = state.snapshot();
    let loading = state.status().is_loading();

    let (balance, total_value) = if loading {
        (Figure::Loading, Figure::Loading)
    } else {
        (
            Figure::Value(format!("{} SOL", format_balance(snapshot.native_balance))),
            Figure::Value(format_usd(snapshot.total_value_estimate)),
        )
    };

    let error_banner = match state.status() {
        FetchStatus::Error(message) => Some(message.clone()),
        _ => None,
    };

    DashboardView::Connected(ConnectedLayout {
        title: CONNECTED_TITLE,
        error_banner,
        balance,
        network_label: connection.network.label.clone(),
        tokens: snapshot.tokens.iter().map(TokenRow::from).collect(),
        total_value,
        refresh_enabled: !loading,
    })
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardView::Disconnected(layout) => {
                writeln!(f, "{}", layout.title)?;
                write!(f, "{}", layout.warning)
            }
            DashboardView::Connected(layout) => {
                writeln!(f, "{}", layout.title)?;
                if let Some(banner) = &layout.error_banner {
                    writeln!(f, "[!] {}", banner)?;
                }

                writeln!(f)?;
                writeln!(f, "SOL Balance Information")?;
                match &layout.balance {
                    Figure::Loading => writeln!(f, "  Loading your balance...")?,
                    Figure::Value(balance) => {
                        writeln!(f, "  {}", balance)?;
                        writeln!(f, "  Current Network: {}", layout.network_label)?;
                    }
                }

                writeln!(f)?;
                writeln!(f, "Token Holdings & Assets")?;
                if layout.tokens.is_empty() {
                    writeln!(f, "  {}", EMPTY_TOKENS_TEXT)?;
                }
                for token in &layout.tokens {
                    writeln!(f, "  {:<14} {:>20} tokens", token.symbol, token.amount)?;
                    writeln!(f, "  {}", token.mint)?;
                }

                writeln!(f)?;
                writeln!(f, "Total Portfolio Value")?;
                match &layout.total_value {
                    Figure::Loading => writeln!(f, "  Loading portfolio value...")?,
                    Figure::Value(total) => writeln!(f, "  {}", total)?,
                }

                if layout.refresh_enabled {
                    write!(f, "  [ {} ]", REFRESH_LABEL)
                } else {
                    write!(f, "  [ {} ] (disabled)", REFRESH_LABEL)
                }
            }
        }
    }
}
