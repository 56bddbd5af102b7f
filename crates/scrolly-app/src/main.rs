//! Scrolly terminal driver entry point.
//!
//! Reads `next`, `prev`, `status` and `quit` from stdin, one per line, and
//! prints the current view label to stdout. Logs go to stderr as JSON.

use std::error::Error;

use scrolly_app::config::AppConfig;
use scrolly_app::driver::{Command, Driver, Session};
use scrolly_chart::context::DEFAULT_BAR_COUNT;
use scrolly_chart::{ChartContext, ViewBox};
use scrolly_core::rng::SeededRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Commands buffered between the stdin reader and the driver.
const COMMAND_BUFFER: usize = 16;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting Scrolly");

    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    let mut rng = match config.seed {
        Some(seed) => SeededRng::from_seed(seed),
        None => SeededRng::from_os(),
    };

    let context = ChartContext::random(ViewBox::default(), DEFAULT_BAR_COUNT, &mut rng)?;
    tracing::info!(dataset = ?context.dataset(), mean = context.mean(), "generated dataset");
    let session = Session::start(context)?;

    let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
    tokio::spawn(read_commands(sender));

    Driver::new(session, &config, tokio::io::stdout())
        .run(receiver)
        .await?;

    Ok(())
}

async fn read_commands(sender: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => match line.parse::<Command>() {
                Ok(command) => {
                    if sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "ignoring input line"),
            },
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        }
    }
}
