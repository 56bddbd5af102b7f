//! Shared test helpers for driver integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use scrolly_app::config::AppConfig;
use scrolly_app::driver::{Command, Driver, Session};
use scrolly_app::error::AppError;
use scrolly_chart::{ChartContext, ViewBox};
use scrolly_test_support::SequenceRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Longer than any step of the chart takes to settle.
pub const SETTLE: Duration = Duration::from_secs(2);

/// Fifteen bars with values cycling through a fixed sequence.
pub fn session() -> Session {
    let mut rng = SequenceRng::new(vec![12, 30, 7, 22, 3, 18, 27, 9, 15, 32, 5, 20, 11, 25, 8]);
    let context = ChartContext::random(ViewBox::default(), 15, &mut rng).unwrap();
    Session::start(context).unwrap()
}

/// Default frame interval, optionally writing snapshots to `output_dir`.
pub fn config(output_dir: Option<PathBuf>) -> AppConfig {
    AppConfig {
        output_dir,
        ..AppConfig::default()
    }
}

/// Spawns a driver over a fresh session and returns its command sender.
pub fn spawn_driver(
    config: &AppConfig,
) -> (
    mpsc::Sender<Command>,
    JoinHandle<Result<Driver<Vec<u8>>, AppError>>,
) {
    let (sender, receiver) = mpsc::channel(16);
    let driver = Driver::new(session(), config, Vec::new());
    let handle = tokio::spawn(driver.run(receiver));
    (sender, handle)
}

/// Lines written by a finished driver.
pub fn output_lines(driver: Driver<Vec<u8>>) -> Vec<String> {
    String::from_utf8(driver.into_output())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// A fresh directory under the system temp dir.
pub fn temp_output_dir() -> PathBuf {
    std::env::temp_dir().join(format!("scrolly-{}", uuid::Uuid::new_v4()))
}
