//! Frame-ticking event loop.
//!
//! Commands arrive on a channel; every frame advances the stage by the time
//! since the previous frame and hands finished transitions to the manager.
//! The current "View: n" label is written after every navigation attempt,
//! and the scene is written as SVG once the transitions started by a
//! navigation have all completed.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use scrolly_chart::{BarChartSequence, ChartContext};
use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;
use scrolly_stage::MemoryStage;
use scrolly_tracking::application::navigation::{StepDrawer, handle_navigate, start};
use scrolly_tracking::application::pump::pump;
use scrolly_tracking::application::query_handlers::{ProgressView, get_progress};
use scrolly_tracking::domain::commands::{Direction, Navigate};
use scrolly_tracking::domain::events::NavigationEvent;
use scrolly_tracking::domain::manager::TransitionsManager;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::AppError;

/// A line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move one step.
    Navigate(Direction),
    /// Print the progress view.
    Status,
    /// Stop reading commands; exit once transitions have finished.
    Quit,
}

impl FromStr for Command {
    type Err = ScrollyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            other => other.parse().map(Self::Navigate),
        }
    }
}

/// The narrative, its scene and its manager.
#[derive(Debug)]
pub struct Session {
    manager: TransitionsManager,
    stage: MemoryStage,
    drawer: BarChartSequence,
}

impl Session {
    /// Draws step 0 of the chart over `context`.
    ///
    /// # Errors
    ///
    /// Propagates drawing errors.
    pub fn start(context: ChartContext) -> Result<Self, ScrollyError> {
        let mut drawer = BarChartSequence::new(context);
        let mut manager = TransitionsManager::new(drawer.number_of_steps())?;
        let mut stage = MemoryStage::new();
        start(&mut manager, &mut stage, &mut drawer)?;
        Ok(Self {
            manager,
            stage,
            drawer,
        })
    }

    /// Moves one step.
    ///
    /// # Errors
    ///
    /// See [`handle_navigate`].
    pub fn navigate(&mut self, direction: Direction) -> Result<NavigationEvent, ScrollyError> {
        handle_navigate(
            &Navigate::new(direction),
            &mut self.manager,
            &mut self.stage,
            &mut self.drawer,
        )
    }

    /// Advances one frame. Returns the number of completed transitions.
    ///
    /// # Errors
    ///
    /// Propagates errors from completion handlers.
    pub fn tick(&mut self, frame: Duration) -> Result<usize, ScrollyError> {
        pump(&mut self.manager, &mut self.stage, frame)
    }

    /// Returns `true` once no transition is running.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.manager.is_idle() && self.stage.pending_transitions() == 0
    }

    /// Current progress.
    #[must_use]
    pub fn progress(&self) -> ProgressView {
        get_progress(&self.manager)
    }

    /// The manager.
    #[must_use]
    pub fn manager(&self) -> &TransitionsManager {
        &self.manager
    }

    /// The scene.
    #[must_use]
    pub fn stage(&self) -> &MemoryStage {
        &self.stage
    }
}

/// Runs a [`Session`] against a command channel.
#[derive(Debug)]
pub struct Driver<W> {
    session: Session,
    frame: Duration,
    output_dir: Option<PathBuf>,
    out: W,
    snapshot_due: bool,
}

impl<W: AsyncWrite + Unpin> Driver<W> {
    /// Creates a driver writing labels and status lines to `out`.
    #[must_use]
    pub fn new(session: Session, config: &AppConfig, out: W) -> Self {
        Self {
            session,
            frame: config.frame,
            output_dir: config.output_dir.clone(),
            out,
            snapshot_due: true,
        }
    }

    /// Processes commands until the channel is closed or `quit` arrives,
    /// then keeps ticking until every transition has finished.
    ///
    /// Navigation refused because transitions are running or because the
    /// narrative is at an end is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if output cannot be written and
    /// `AppError::Scrolly` for any other narrative error.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> Result<Self, AppError> {
        let mut ticker = tokio::time::interval(self.frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut open = true;
        let mut last_frame = Instant::now();

        let label = self.session.progress().label;
        self.write_line(&label).await?;

        loop {
            if !open && self.session.is_settled() {
                break;
            }
            tokio::select! {
                biased;
                now = ticker.tick() => {
                    let elapsed = now.saturating_duration_since(last_frame);
                    last_frame = now;
                    self.on_frame(elapsed).await?;
                }
                command = commands.recv(), if open => match command {
                    Some(Command::Quit) => {
                        info!("quit requested");
                        commands.close();
                        open = false;
                    }
                    None => {
                        debug!("command channel closed");
                        open = false;
                    }
                    Some(Command::Status) => {
                        let status = serde_json::to_string(&self.session.progress())
                            .map_err(std::io::Error::other)?;
                        self.write_line(&status).await?;
                    }
                    Some(Command::Navigate(direction)) => self.on_navigate(direction).await?,
                },
            }
        }
        if self.snapshot_due {
            self.write_snapshot().await?;
        }
        info!(step = self.session.manager().step(), "driver stopped");
        Ok(self)
    }

    /// The driven session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consumes the driver, returning its output sink.
    #[must_use]
    pub fn into_output(self) -> W {
        self.out
    }

    async fn on_navigate(&mut self, direction: Direction) -> Result<(), AppError> {
        match self.session.navigate(direction) {
            Ok(event) => {
                info!(
                    event_type = event.event_type(),
                    payload = %event.to_payload(),
                    "navigation event"
                );
                self.snapshot_due = true;
            }
            Err(err @ (ScrollyError::TransitionsInFlight(_) | ScrollyError::StepOutOfRange { .. })) => {
                warn!(error = %err, ?direction, "navigation ignored");
            }
            Err(err) => return Err(err.into()),
        }
        let label = self.session.progress().label;
        self.write_line(&label).await
    }

    async fn on_frame(&mut self, elapsed: Duration) -> Result<(), AppError> {
        self.session.tick(elapsed)?;
        if self.snapshot_due && self.session.is_settled() {
            self.snapshot_due = false;
            self.write_snapshot().await?;
        }
        Ok(())
    }

    async fn write_snapshot(&self) -> Result<(), AppError> {
        let Some(dir) = &self.output_dir else {
            return Ok(());
        };
        let step = self.session.manager().step();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("step-{step}.svg"));
        tokio::fs::write(&path, self.session.stage().to_svg()).await?;
        info!(path = %path.display(), step, "wrote snapshot");
        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> Result<(), AppError> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}
