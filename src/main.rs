use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use solana_portfolio_dashboard::utils::helper::format_address;
use solana_portfolio_dashboard::{
  CompositeEventHandler, ConnectionHandle, ConsoleEventHandler, DashboardConfig,
  FixedPriceProvider, PortfolioDashboard, PortfolioFetcher,
  RefreshOutcome, RpcBalanceProvider,
};

const HELP: &str = "Commands: connect <address> | disconnect | refresh | show | help | quit";

/// One line of console input
#[derive(Debug, PartialEq, Eq)]
enum Command {
  Connect(String),
  Disconnect,
  Refresh,
  Show,
  Help,
  Quit,
}

impl Command {
  fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
      return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
      "connect" | "c" => match (parts.next(), parts.next()) {
        (Some(address), None) => Command::Connect(address.to_string()),
        _ => return Err("usage: connect <address>".to_string()),
      },
      "disconnect" | "d" => Command::Disconnect,
      "refresh" | "r" => Command::Refresh,
      "show" | "s" => Command::Show,
      "help" | "h" | "?" => Command::Help,
      "quit" | "q" | "exit" => Command::Quit,
      other => return Err(format!("unknown command: {}", other)),
    };
    Ok(Some(command))
  }
}

/// Apply a connection change in input order, then fetch off the input loop
async fn connect(dashboard: &PortfolioDashboard, handle: Option<ConnectionHandle>) {
  let update = dashboard.observe_connection(handle).await;
  if let Some(pending) = update.pending {
    let dashboard = dashboard.clone();
    tokio::spawn(async move {
      dashboard.run_fetch(pending).await;
    });
  }
}

async fn run(config: DashboardConfig) -> anyhow::Result<()> {
  info!("Initializing portfolio dashboard...");
  info!("RPC URL: {}", config.rpc_url);
  info!("Network: {}", config.network);
  info!("Placeholder SOL price: ${:.2}", config.sol_price_usd);

  let balance_provider = Arc::new(RpcBalanceProvider::new(
    config.rpc_url.clone(),
    config.commitment,
  ));
  let price_provider = Arc::new(FixedPriceProvider::new(config.sol_price_usd));
  let fetcher = PortfolioFetcher::new(balance_provider, price_provider);

  let mut handlers = CompositeEventHandler::new();
  handlers.add_handler(Arc::new(ConsoleEventHandler::new()));

  let dashboard = PortfolioDashboard::new(fetcher, Arc::new(handlers));
  dashboard.publish().await;

  if let Some(address) = &config.wallet_address {
    info!("Connecting wallet from WALLET_ADDRESS: {}", format_address(address));
    connect(
      &dashboard,
      Some(ConnectionHandle::new(address.clone(), config.network.clone())),
    )
    .await;
  }

  info!("{}", HELP);
  info!("Portfolio dashboard is running. Press Ctrl+C to stop.");

  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  loop {
    let line = tokio::select! {
      _ = tokio::signal::ctrl_c() => break,
      line = lines.next_line() => line?,
    };

    let Some(line) = line else {
      break;
    };

    match Command::parse(&line) {
      Ok(None) => {}
      Ok(Some(Command::Connect(address))) => {
        let handle = ConnectionHandle::new(address, config.network.clone());
        connect(&dashboard, Some(handle)).await;
      }
      Ok(Some(Command::Disconnect)) => connect(&dashboard, None).await,
      Ok(Some(Command::Refresh)) => match dashboard.start_refresh().await {
        Ok(pending) => {
          let dashboard = dashboard.clone();
          tokio::spawn(async move {
            dashboard.run_fetch(pending).await;
          });
        }
        Err(RefreshOutcome::SkippedWhileLoading) => {
          warn!("Refresh ignored: portfolio is still loading")
        }
        Err(RefreshOutcome::SkippedDisconnected) => {
          warn!("Refresh ignored: no wallet connected")
        }
        Err(RefreshOutcome::Started) => {}
      },
      Ok(Some(Command::Show)) => dashboard.publish().await,
      Ok(Some(Command::Help)) => info!("{}", HELP),
      Ok(Some(Command::Quit)) => break,
      Err(message) => error!("{}. {}", message, HELP),
    }
  }

  info!("Shutting down...");
  Ok(())
}

fn main() -> anyhow::Result<()> {
  let config = DashboardConfig::from_env()?;

  // Initialize logging
  tracing_subscriber::fmt()
    .with_level(true)
    .with_target(false)
    .with_max_level(config.log_level)
    .with_file(true)
    .with_line_number(true)
    .init();

  let runtime = tokio::runtime::Runtime::new()?;
  let result = runtime.block_on(run(config));

  // The stdin reader sits on a blocking thread that never returns on its own.
  runtime.shutdown_background();
  result
}
