use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::fetcher::PortfolioFetcher;
use super::renderer::{render, DashboardView};
use super::state::{
    ConnectionChange, FetchFailed, FetchStatus, PendingFetch, RefreshOutcome, ViewState,
};
use crate::models::{ConnectionHandle, PortfolioSnapshot};
use crate::traits::event_handler::DashboardEventHandler;

/// Outcome of observing a connection handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUpdate {
    pub change: ConnectionChange,
    /// Fetch started for the new handle; hand it to [`PortfolioDashboard::run_fetch`]
    pub pending: Option<PendingFetch>,
}

/// Dashboard instance: owns one view state and drives its fetches.
///
/// Cloning is cheap and yields another handle to the same instance, so a
/// fetch can be spawned onto the runtime while the caller keeps reading
/// the last-known view.
///
/// Views reach the event handler one at a time. Whoever holds the publish
/// guard keeps re-rendering until the published revision matches the
/// state, so the last view handed out always reflects the current state.
#[derive(Clone)]
pub struct PortfolioDashboard {
    fetcher: Arc<PortfolioFetcher>,
    event_handler: Arc<dyn DashboardEventHandler>,
    state: Arc<Mutex<ViewState>>,
    publish_guard: Arc<Mutex<()>>,
    published_revision: Arc<AtomicU64>,
}

impl PortfolioDashboard {
    /// Create a new dashboard with no wallet connected
    pub fn new(fetcher: PortfolioFetcher, event_handler: Arc<dyn DashboardEventHandler>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            event_handler,
            state: Arc::new(Mutex::new(ViewState::new())),
            publish_guard: Arc::new(Mutex::new(())),
            published_revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current layout
    pub async fn view(&self) -> DashboardView {
        render(&*self.state.lock().await)
    }

    pub async fn status(&self) -> FetchStatus {
        self.state.lock().await.status().clone()
    }

    pub async fn snapshot(&self) -> PortfolioSnapshot {
        self.state.lock().await.snapshot().clone()
    }

    pub async fn connection(&self) -> Option<ConnectionHandle> {
        self.state.lock().await.connection().cloned()
    }

    async fn rendered(&self) -> (u64, DashboardView) {
        let state = self.state.lock().await;
        (state.revision(), render(&state))
    }

    /// Render the current state and hand it to the event handler, even if
    /// it was already published
    pub async fn publish(&self) {
        {
            let _guard = self.publish_guard.lock().await;
            let (revision, view) = self.rendered().await;
            self.event_handler.handle_view_change(view).await;
            self.published_revision.store(revision, Ordering::SeqCst);
        }
        self.flush().await;
    }

    /// Publish the current state if it changed since the last published view.
    ///
    /// Returns at once when another task holds the publish guard; that task
    /// re-checks the revision after releasing it and picks the change up.
    async fn flush(&self) {
        loop {
            {
                let Ok(_guard) = self.publish_guard.try_lock() else {
                    return;
                };
                let (revision, view) = self.rendered().await;
                if revision != self.published_revision.load(Ordering::SeqCst) {
                    self.event_handler.handle_view_change(view).await;
                    self.published_revision.store(revision, Ordering::SeqCst);
                }
            }

            let current = self.state.lock().await.revision();
            if current == self.published_revision.load(Ordering::SeqCst) {
                return;
            }
        }
    }

    /// Record the handle supplied by the wallet provider without waiting
    /// for the resulting fetch.
    ///
    /// Callers that observe handles from a single task get them applied in
    /// the order the provider emitted them; the returned fetch can then be
    /// spawned.
    pub async fn observe_connection(&self, handle: Option<ConnectionHandle>) -> ConnectionUpdate {
        let update = {
            let mut state = self.state.lock().await;
            let change = state.set_connection(handle);
            let pending = match change {
                ConnectionChange::Connected => state.begin_fetch(),
                _ => None,
            };
            ConnectionUpdate { change, pending }
        };

        match update.change {
            ConnectionChange::Unchanged => {
                debug!("Connection unchanged, nothing to fetch");
                return update;
            }
            ConnectionChange::Disconnected => info!("Wallet disconnected"),
            ConnectionChange::Connected => {
                if let Some(pending) = &update.pending {
                    info!("Wallet connected: {}", pending.address);
                }
            }
        }

        self.flush().await;
        update
    }

    /// Observe the handle supplied by the wallet provider.
    ///
    /// A newly present or different handle starts exactly one fetch, which
    /// this call awaits. Losing the handle starts nothing.
    pub async fn set_connection(&self, handle: Option<ConnectionHandle>) -> ConnectionChange {
        let update = self.observe_connection(handle).await;
        if let Some(pending) = update.pending {
            self.run_fetch(pending).await;
        }
        update.change
    }

    /// Enter `Loading` for a manual refresh without waiting for the fetch.
    ///
    /// Fails with the skip reason while loading or when no wallet is
    /// connected.
    pub async fn start_refresh(&self) -> Result<PendingFetch, RefreshOutcome> {
        let pending = {
            let mut state = self.state.lock().await;
            match state.begin_refresh() {
                Ok(pending) => pending,
                Err(skipped) => {
                    debug!("Refresh skipped: {:?}", skipped);
                    return Err(skipped);
                }
            }
        };

        info!("Refreshing portfolio for {}", pending.address);
        self.flush().await;
        Ok(pending)
    }

    /// Re-fetch the portfolio of the connected wallet.
    ///
    /// Does nothing while a fetch is loading or when no wallet is connected.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.start_refresh().await {
            Ok(pending) => {
                self.run_fetch(pending).await;
                RefreshOutcome::Started
            }
            Err(skipped) => skipped,
        }
    }

    /// Perform a started fetch and apply its result unless superseded
    pub async fn run_fetch(&self, pending: PendingFetch) {
        let result = match self.fetcher.fetch(&pending.address).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!("Portfolio fetch failed for {}", pending.address);
                self.event_handler.handle_error(&e).await;
                Err(FetchFailed)
            }
        };

        let applied = self.state.lock().await.complete_fetch(pending.token, result);

        if applied {
            self.flush().await;
        } else {
            debug!("Discarding superseded fetch for {}", pending.address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use tokio::sync::{oneshot, Notify};

    use crate::dashboard::renderer::Figure;
    use crate::dashboard::state::FETCH_FAILED_MESSAGE;
    use crate::models::NetworkLabel;
    use crate::providers::FixedPriceProvider;
    use crate::traits::BalanceProvider;

    /// Balance provider whose answers are released by the test
    #[derive(Default)]
    struct GatedBalance {
        gates: StdMutex<HashMap<String, oneshot::Receiver<anyhow::Result<u64>>>>,
        calls: StdMutex<Vec<String>>,
    }

    impl GatedBalance {
        fn gate(&self, address: &str) -> oneshot::Sender<anyhow::Result<u64>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(address.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BalanceProvider for GatedBalance {
        async fn get_balance(&self, address: &str) -> anyhow::Result<u64> {
            self.calls.lock().unwrap().push(address.to_string());
            let gate = self.gates.lock().unwrap().remove(address);
            match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| Err(anyhow::anyhow!("gate dropped"))),
                None => Err(anyhow::anyhow!("no balance scripted for {}", address)),
            }
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        views: StdMutex<Vec<DashboardView>>,
        errors: StdMutex<Vec<String>>,
    }

    impl RecordingHandler {
        fn views(&self) -> Vec<DashboardView> {
            self.views.lock().unwrap().clone()
        }

        fn errors(&self) -> Vec<String> {
            self.errors.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DashboardEventHandler for RecordingHandler {
        async fn handle_view_change(&self, view: DashboardView) {
            self.views.lock().unwrap().push(view);
        }

        async fn handle_error(&self, error: &anyhow::Error) {
            self.errors.lock().unwrap().push(format!("{:#}", error));
        }
    }

    fn setup() -> (PortfolioDashboard, Arc<GatedBalance>, Arc<RecordingHandler>) {
        let balance = Arc::new(GatedBalance::default());
        let handler = Arc::new(RecordingHandler::default());
        let fetcher = PortfolioFetcher::new(balance.clone(), Arc::new(FixedPriceProvider::default()));
        let dashboard = PortfolioDashboard::new(fetcher, handler.clone());
        (dashboard, balance, handler)
    }

    fn handle(address: &str) -> Option<ConnectionHandle> {
        Some(ConnectionHandle::new(address, NetworkLabel::new("devnet")))
    }

    async fn wait_for_calls(balance: &GatedBalance, count: usize) {
        while balance.calls().len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_connect_loads_once_then_settles() {
        let (dashboard, balance, handler) = setup();
        balance.gate("Addr1").send(Ok(1_500_000_000)).unwrap();

        let change = dashboard.set_connection(handle("Addr1")).await;
        assert_eq!(change, ConnectionChange::Connected);

        let views = handler.views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].connected().unwrap().balance, Figure::Loading);
        assert_eq!(views[1].connected().unwrap().balance.value(), Some("1.50 SOL"));
        assert_eq!(views[1].connected().unwrap().total_value.value(), Some("$225.00 USD"));

        assert_eq!(dashboard.status().await, FetchStatus::Idle);
        assert_eq!(balance.calls(), vec!["Addr1".to_string()]);
    }

    #[tokio::test]
    async fn test_zero_balance_scenario() {
        let (dashboard, balance, _handler) = setup();
        balance.gate("Addr1").send(Ok(0)).unwrap();

        dashboard.set_connection(handle("Addr1")).await;

        let view = dashboard.view().await;
        let layout = view.connected().unwrap();
        assert_eq!(layout.balance.value(), Some("0.00 SOL"));
        assert_eq!(layout.total_value.value(), Some("$0.00 USD"));
        assert_eq!(layout.tokens.len(), 1);
        assert_eq!(layout.tokens[0].amount, "0.0000");
    }

    #[tokio::test]
    async fn test_same_handle_does_not_refetch() {
        let (dashboard, balance, _handler) = setup();
        balance.gate("Addr1").send(Ok(1)).unwrap();

        dashboard.set_connection(handle("Addr1")).await;
        let change = dashboard.set_connection(handle("Addr1")).await;

        assert_eq!(change, ConnectionChange::Unchanged);
        assert_eq!(balance.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_snapshot_and_hides_detail() {
        let (dashboard, balance, handler) = setup();
        balance.gate("Addr1").send(Ok(2_000_000_000)).unwrap();
        dashboard.set_connection(handle("Addr1")).await;
        let before = dashboard.snapshot().await;

        balance
            .gate("Addr1")
            .send(Err(anyhow::anyhow!("connection reset by peer")))
            .unwrap();
        assert_eq!(dashboard.refresh().await, RefreshOutcome::Started);

        assert_eq!(dashboard.snapshot().await, before);
        assert_eq!(
            dashboard.status().await,
            FetchStatus::Error(FETCH_FAILED_MESSAGE.to_string())
        );

        let view = dashboard.view().await;
        assert!(!view.to_string().contains("connection reset"));
        assert_eq!(view.connected().unwrap().balance.value(), Some("2.00 SOL"));

        let errors = handler.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("connection reset by peer"));
    }

    #[tokio::test]
    async fn test_refresh_while_loading_is_noop() {
        let (dashboard, balance, _handler) = setup();
        let gate = balance.gate("Addr1");

        let task = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.set_connection(handle("Addr1")).await })
        };
        wait_for_calls(&balance, 1).await;

        assert!(dashboard.status().await.is_loading());
        assert_eq!(dashboard.refresh().await, RefreshOutcome::SkippedWhileLoading);
        assert_eq!(balance.calls().len(), 1);

        gate.send(Ok(1_000_000_000)).unwrap();
        task.await.unwrap();
        assert_eq!(dashboard.status().await, FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_refresh_without_wallet() {
        let (dashboard, balance, handler) = setup();
        assert_eq!(dashboard.refresh().await, RefreshOutcome::SkippedDisconnected);
        assert!(balance.calls().is_empty());
        assert!(handler.views().is_empty());
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let (dashboard, balance, _handler) = setup();
        let slow = balance.gate("Addr1");
        let fast = balance.gate("Addr2");

        let first = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.set_connection(handle("Addr1")).await })
        };
        wait_for_calls(&balance, 1).await;

        let second = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.set_connection(handle("Addr2")).await })
        };
        wait_for_calls(&balance, 2).await;

        fast.send(Ok(3_000_000_000)).unwrap();
        second.await.unwrap();
        slow.send(Ok(1_000_000_000)).unwrap();
        first.await.unwrap();

        let snapshot = dashboard.snapshot().await;
        assert_eq!(snapshot.native_balance, 3.0);
        assert_eq!(snapshot.tokens[0].mint(), "Addr2");
        assert_eq!(dashboard.status().await, FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_disconnect_renders_warning() {
        let (dashboard, balance, handler) = setup();
        balance.gate("Addr1").send(Ok(1_500_000_000)).unwrap();
        dashboard.set_connection(handle("Addr1")).await;

        let change = dashboard.set_connection(None).await;

        assert_eq!(change, ConnectionChange::Disconnected);
        assert!(dashboard.view().await.is_disconnected());
        assert!(handler.views().last().unwrap().is_disconnected());
        assert_eq!(balance.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_reconnect_after_disconnect_mid_fetch() {
        let (dashboard, balance, _handler) = setup();
        let abandoned = balance.gate("Addr1");

        let first = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.set_connection(handle("Addr1")).await })
        };
        wait_for_calls(&balance, 1).await;

        dashboard.set_connection(None).await;
        assert_eq!(dashboard.status().await, FetchStatus::Idle);

        balance.gate("Addr1").send(Ok(5_000_000_000)).unwrap();
        dashboard.set_connection(handle("Addr1")).await;
        assert_eq!(dashboard.snapshot().await.native_balance, 5.0);

        abandoned.send(Ok(1)).unwrap();
        first.await.unwrap();
        assert_eq!(dashboard.snapshot().await.native_balance, 5.0);
    }

    /// Handler that stalls on the first settled connected view until released
    #[derive(Default)]
    struct StallingHandler {
        views: StdMutex<Vec<DashboardView>>,
        stalled: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl DashboardEventHandler for StallingHandler {
        async fn handle_view_change(&self, view: DashboardView) {
            let settled = view
                .connected()
                .map_or(false, |layout| layout.balance.value().is_some());
            if settled && !self.stalled.swap(true, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.views.lock().unwrap().push(view);
        }

        async fn handle_error(&self, _error: &anyhow::Error) {}
    }

    #[tokio::test]
    async fn test_disconnect_during_slow_publish_is_published_last() {
        let balance = Arc::new(GatedBalance::default());
        let handler = Arc::new(StallingHandler::default());
        let fetcher = PortfolioFetcher::new(balance.clone(), Arc::new(FixedPriceProvider::default()));
        let dashboard = PortfolioDashboard::new(fetcher, handler.clone());
        balance.gate("Addr1").send(Ok(1_500_000_000)).unwrap();

        let connect = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.set_connection(handle("Addr1")).await })
        };
        handler.entered.notified().await;

        assert_eq!(dashboard.set_connection(None).await, ConnectionChange::Disconnected);
        assert!(dashboard.view().await.is_disconnected());

        handler.release.notify_one();
        assert_eq!(connect.await.unwrap(), ConnectionChange::Connected);

        let views = handler.views.lock().unwrap().clone();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].connected().unwrap().balance, Figure::Loading);
        assert_eq!(views[1].connected().unwrap().balance.value(), Some("1.50 SOL"));
        assert!(views[2].is_disconnected());
    }

    #[tokio::test]
    async fn test_observed_handles_apply_in_order() {
        let (dashboard, balance, handler) = setup();

        let connected = dashboard.observe_connection(handle("Addr1")).await;
        assert_eq!(connected.change, ConnectionChange::Connected);
        let pending = connected.pending.unwrap();
        assert_eq!(pending.address, "Addr1");

        let disconnected = dashboard.observe_connection(None).await;
        assert_eq!(disconnected.change, ConnectionChange::Disconnected);
        assert!(disconnected.pending.is_none());
        assert_eq!(dashboard.connection().await, None);

        balance.gate("Addr1").send(Ok(2_000_000_000)).unwrap();
        dashboard.run_fetch(pending).await;

        assert_eq!(balance.calls().len(), 1);
        assert!(dashboard.snapshot().await.tokens.is_empty());
        assert!(dashboard.view().await.is_disconnected());
        assert!(handler.views().last().unwrap().is_disconnected());
    }

    #[tokio::test]
    async fn test_network_change_refetches_same_address() {
        let (dashboard, balance, handler) = setup();
        balance.gate("Addr1").send(Ok(1_000_000_000)).unwrap();
        dashboard.set_connection(handle("Addr1")).await;

        balance.gate("Addr1").send(Ok(4_000_000_000)).unwrap();
        let testnet = ConnectionHandle::new("Addr1", NetworkLabel::new("testnet"));
        let change = dashboard.set_connection(Some(testnet.clone())).await;

        assert_eq!(change, ConnectionChange::Connected);
        assert_eq!(balance.calls().len(), 2);
        assert_eq!(dashboard.connection().await, Some(testnet));
        assert_eq!(dashboard.snapshot().await.native_balance, 4.0);

        let views = handler.views();
        assert_eq!(views.len(), 4);
        assert_eq!(views[2].connected().unwrap().balance, Figure::Loading);
        let layout = views[3].connected().unwrap();
        assert_eq!(layout.balance.value(), Some("4.00 SOL"));
        assert_eq!(layout.network_label, "testnet");
    }
}
