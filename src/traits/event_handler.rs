use async_trait::async_trait;

use crate::dashboard::renderer::DashboardView;

/// Receiver for dashboard output.
///
/// Acts as the render surface (`handle_view_change`) and as the
/// operational diagnostic channel (`handle_error`). Error detail passed to
/// `handle_error` is never part of a rendered view.
#[async_trait]
pub trait DashboardEventHandler: Send + Sync {
    /// Handle a freshly rendered view
    async fn handle_view_change(&self, view: DashboardView);

    /// Handle the underlying cause of a failed fetch
    async fn handle_error(&self, error: &anyhow::Error);
}
