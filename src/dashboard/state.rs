//! View-state record owned by a single dashboard instance.
//!
//! All transitions of the fetch lifecycle live here as plain `&mut self`
//! methods so the state machine can be exercised without a runtime:
//!
//! ```text
//! Idle ──begin──▶ Loading ──complete(Ok)──▶ Idle
//!                    │
//!                    └────complete(Err)───▶ Error(msg) ──begin──▶ Loading
//! ```

use std::fmt;

use crate::models::{ConnectionHandle, PortfolioSnapshot};

/// Message shown to the user for every failed fetch
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch portfolio data.";

/// The only fetch error that reaches the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchFailed;

impl fmt::Display for FetchFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FETCH_FAILED_MESSAGE)
    }
}

impl std::error::Error for FetchFailed {}

/// Status of the most recent fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued fetch; only the latest token may update state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// A fetch that has been started and must be completed with its token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub token: RequestToken,
    pub address: String,
}

/// Effect of handing a new connection handle to the view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionChange {
    Unchanged,
    Connected,
    Disconnected,
}

/// Result of a manual refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Started,
    SkippedWhileLoading,
    SkippedDisconnected,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    connection: Option<ConnectionHandle>,
    status: FetchStatus,
    snapshot: PortfolioSnapshot,
    latest_request: u64,
    revision: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(&self) -> Option<&ConnectionHandle> {
        self.connection.as_ref()
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    /// Counter bumped by every transition that changes the rendered view
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record the handle currently supplied by the wallet provider.
    ///
    /// Any change of identity supersedes in-flight fetches. Disconnecting
    /// also drops back to `Idle`; the stored snapshot is kept but is not
    /// rendered while no wallet is connected.
    pub fn set_connection(&mut self, handle: Option<ConnectionHandle>) -> ConnectionChange {
        if self.connection == handle {
            return ConnectionChange::Unchanged;
        }

        self.latest_request += 1;
        self.revision += 1;
        self.connection = handle;

        if self.connection.is_some() {
            ConnectionChange::Connected
        } else {
            self.status = FetchStatus::Idle;
            ConnectionChange::Disconnected
        }
    }

    /// Enter `Loading` for the connected address and issue a new token.
    ///
    /// Returns `None` when no wallet is connected.
    pub fn begin_fetch(&mut self) -> Option<PendingFetch> {
        let address = self.connection.as_ref()?.address.clone();

        self.latest_request += 1;
        self.revision += 1;
        self.status = FetchStatus::Loading;

        Some(PendingFetch {
            token: RequestToken(self.latest_request),
            address,
        })
    }

    /// Manual refresh: same as `begin_fetch` but never while loading
    pub fn begin_refresh(&mut self) -> Result<PendingFetch, RefreshOutcome> {
        if self.status.is_loading() {
            return Err(RefreshOutcome::SkippedWhileLoading);
        }
        self.begin_fetch().ok_or(RefreshOutcome::SkippedDisconnected)
    }

    /// Apply the result of the fetch identified by `token`.
    ///
    /// Results from superseded fetches are ignored and `false` is
    /// returned. A failure keeps the previous snapshot.
    pub fn complete_fetch(
        &mut self,
        token: RequestToken,
        result: Result<PortfolioSnapshot, FetchFailed>,
    ) -> bool {
        if token != RequestToken(self.latest_request) {
            return false;
        }

        self.revision += 1;
        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.status = FetchStatus::Idle;
            }
            Err(failure) => {
                self.status = FetchStatus::Error(failure.to_string());
            }
        }
        true
    }
}
