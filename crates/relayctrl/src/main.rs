//! RelayCtrl entry point.
//!
//! Loads the configuration, resynchronizes the relay cache from the board,
//! installs the keyboard hook and runs the event dispatch loop until Ctrl-C.
//!
//! # Usage
//!
//! ```text
//! relayctrl [CONFIG]
//!
//! Arguments:
//!   [CONFIG]  Path to the JSON configuration file [env: RELAYCTRL_CONFIG=] [default: config.json]
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ JsonConfigStore::load()     -- defaults on failure
//!  └─ EngineContext::new()        -- index, relay cache, status
//!  └─ resync()                    -- before any key event
//!  └─ platform_source().start()   -- Windows hook thread
//!  └─ EventDispatchLoop::run()    -- until Ctrl-C or hook stream closes
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use relayctrl::application::context::EngineContext;
use relayctrl::application::dispatch::EventDispatchLoop;
use relayctrl::application::manage_mappings::ConfigStore;
use relayctrl::application::resync::resync;
use relayctrl::infrastructure::input_capture::platform_source;
use relayctrl::infrastructure::relay_client::HttpRelayClient;
use relayctrl::infrastructure::storage::config::JsonConfigStore;
use relayctrl_core::{AppConfig, BoardEndpoint};

/// Switches networked relay board channels from keyboard chords.
#[derive(Debug, Parser)]
#[command(name = "relayctrl", version)]
struct Cli {
    /// Path to the JSON configuration file.
    ///
    /// Created on the first save if it does not exist.
    #[arg(default_value = "config.json", env = "RELAYCTRL_CONFIG")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(config = %cli.config.display(), "RelayCtrl starting");

    let store = Arc::new(JsonConfigStore::new(&cli.config));
    let config = store.load().unwrap_or_else(|e| {
        warn!(
            path = %store.path().display(),
            error = %e,
            "could not load configuration, using defaults"
        );
        AppConfig::default()
    });
    info!(
        mappings = config.mappings.len(),
        api = %config.api,
        num_relays = config.num_relays,
        "configuration loaded"
    );

    let board = Arc::new(HttpRelayClient::new(BoardEndpoint::from(&config)));
    let ctx = Arc::new(EngineContext::new(config, board, store));

    // A failed resync is recorded in the remote status; keep going.
    if resync(&ctx).await.is_err() {
        warn!("starting with all relays believed off");
    }

    let source = platform_source().context("keyboard capture unavailable")?;
    let events = source.start().context("failed to start keyboard capture")?;

    info!("RelayCtrl ready.  Press Ctrl-C to exit.");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("shutdown signal received");
    };
    EventDispatchLoop::new(Arc::clone(&ctx)).run(events, shutdown).await;

    source.stop();
    info!("RelayCtrl stopped");
    Ok(())
}
