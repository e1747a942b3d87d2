use board_export::core::sync::{SyncConfig, SyncTrigger, DEFAULT_SYNC_URL};
use board_export::utils::{logger, validation::Validate};
use clap::error::ErrorKind;
use clap::Parser;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sync-trigger")]
#[command(about = "Fire one POST at the invoice sync endpoint and log the result")]
struct Args {
    #[arg(long, env = "SYNC_URL", default_value = DEFAULT_SYNC_URL)]
    url: String,

    #[arg(long, env = "SYNC_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

// Best effort: every failure is logged and the process still exits with 0.
#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            logger::init_logger(false, false);
            let reason = e.to_string();
            let reason = reason.lines().next().unwrap_or_default().trim_start_matches("error: ");
            tracing::error!(category = "config", "Sync failed: {}", reason);
            return;
        }
    };
    logger::init_logger(args.verbose, args.log_json);

    let config = SyncConfig {
        url: args.url,
        timeout: Duration::from_secs(args.timeout_secs),
    };

    if let Err(e) = config.validate() {
        tracing::error!(category = "config", "Sync failed: {}", e);
        return;
    }

    match SyncTrigger::new(config) {
        Ok(trigger) => {
            trigger.run_best_effort().await;
        }
        Err(e) => tracing::error!(category = "transport", "Sync failed: {}", e),
    }
}
