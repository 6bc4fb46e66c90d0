use async_trait::async_trait;
use tracing::{error, info};

use crate::dashboard::renderer::DashboardView;
use crate::traits::event_handler::DashboardEventHandler;

/// Console render surface: writes each rendered view to the log
pub struct ConsoleEventHandler;

impl ConsoleEventHandler {
    /// Create a new console event handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardEventHandler for ConsoleEventHandler {
    async fn handle_view_change(&self, view: DashboardView) {
        info!("{}", "=".repeat(80));
        for line in view.to_string().lines() {
            info!("{}", line);
        }
        info!("{}", "=".repeat(80));
    }

    async fn handle_error(&self, error: &anyhow::Error) {
        error!("Portfolio fetch error: {:#}", error);
    }
}
