//! Contact Book - Main entry point
//!
//! Runs the interactive address book on stdin/stdout. Logs go to stderr.

use anyhow::{Context, Result};
use contact_book::session::{Session, SystemClock};
use contact_book::storage::JsonFileStorage;
use contact_book::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let fallback = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Using address book at {}", config.book_path.display());

    let storage = JsonFileStorage::new(&config.book_path);
    let mut session = match Session::open(storage, config.session_settings()) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to load address book: {}", e);
            return Err(e).context("could not load the address book");
        }
    };

    // Current-thread runtime: one loop racing stdin against Ctrl-C
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("could not start the runtime")?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let result = runtime.block_on(session.run(stdin, &mut stdout, &SystemClock, shutdown));

    // A pending blocking stdin read would otherwise hold shutdown open
    runtime.shutdown_background();

    if let Err(e) = &result {
        error!("Session ended with an error: {}", e);
    }
    result?;

    info!("Contact book shutdown complete");
    Ok(())
}
