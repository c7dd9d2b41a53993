//! The polling loop.
//!
//! Each cycle fetches the departure board, turns it into display lines and
//! renders them, then waits before the next cycle. The wait grows after
//! failures and resets after a success (see [`RefreshController`]).
//!
//! ```text
//! Idle → Fetching → Rendering  → Waiting → Idle
//!                 ↘ BackingOff ↗
//! ```
//!
//! A failed cycle never renders, so whatever was last shown stays up. Nothing
//! that happens inside a cycle stops the loop; only the shutdown token does.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::display::{Display, DisplayError};
use crate::domain::{Clock, SystemClock, TimetableEntry};
use crate::refresh::{RefreshController, WaitOutcome};
use crate::transilien::{FetchError, ParseError, TransilienClient, TransilienConfig, parse_schedule};

/// Where the departure board comes from.
pub trait ScheduleSource {
    /// Fetch the raw board text.
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>>;
}

impl ScheduleSource for TransilienClient {
    async fn fetch(&self) -> Result<String, FetchError> {
        TransilienClient::fetch(self).await
    }
}

/// Where the formatted lines go.
pub trait Sink {
    /// Show `lines`, replacing whatever was shown before.
    fn render(&self, lines: &[String]) -> Result<(), DisplayError>;
}

impl Sink for Display {
    fn render(&self, lines: &[String]) -> Result<(), DisplayError> {
        Display::render(self, lines)
    }
}

/// Anything that fails a single cycle.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] DisplayError),
}

/// Errors building the watcher from configuration. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Client(#[from] FetchError),
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Between cycles
    Idle,
    /// Waiting on the API
    Fetching,
    /// Handing lines to the display
    Rendering,
    /// The cycle failed; the interval is being raised
    BackingOff,
    /// Sleeping until the next cycle
    Waiting,
    /// Shutdown was requested
    Stopped,
}

/// The fetch → parse → render → wait loop.
pub struct Watcher<S, D, C = SystemClock> {
    source: S,
    sink: D,
    clock: C,
    date_format: String,
    refresh: RefreshController,
    state: WatcherState,
    cycles: u64,
}

/// Build the production watcher from configuration.
///
/// The display is selected first, so an unsupported device type fails
/// before the API client exists.
pub fn build(config: &Config) -> Result<Watcher<TransilienClient, Display>, BuildError> {
    let display = Display::select(&config.device)?;
    let client = TransilienClient::new(TransilienConfig::from(config))?;

    info!(url = client.url(), "watching departure board");

    Ok(Watcher::new(
        client,
        display,
        SystemClock,
        &config.api.date_format,
        RefreshController::new(config.refresh_time),
    ))
}

impl<S, D, C> Watcher<S, D, C>
where
    S: ScheduleSource,
    D: Sink,
    C: Clock,
{
    /// Create a watcher.
    pub fn new(
        source: S,
        sink: D,
        clock: C,
        date_format: impl Into<String>,
        refresh: RefreshController,
    ) -> Self {
        Self {
            source,
            sink,
            clock,
            date_format: date_format.into(),
            refresh,
            state: WatcherState::Idle,
            cycles: 0,
        }
    }

    /// Returns the current loop state.
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Returns the refresh controller.
    pub fn refresh(&self) -> &RefreshController {
        &self.refresh
    }

    /// Returns the number of cycles run so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one fetch → parse → render step and adjust the interval.
    ///
    /// Returns the number of lines rendered. On error nothing was rendered
    /// and the interval has been raised.
    pub async fn run_cycle(&mut self) -> Result<usize, CycleError> {
        self.cycles += 1;
        self.state = WatcherState::Fetching;

        match self.fetch_and_render().await {
            Ok(count) => {
                self.refresh.reset();
                debug!(lines = count, "departure board rendered");
                Ok(count)
            }
            Err(e) => {
                self.state = WatcherState::BackingOff;
                self.refresh.increase();
                warn!(
                    error = %e,
                    retry_in_secs = self.refresh.current_secs(),
                    "cycle failed"
                );
                Err(e)
            }
        }
    }

    async fn fetch_and_render(&mut self) -> Result<usize, CycleError> {
        let document = self.source.fetch().await?;
        let entries = parse_schedule(&document, &self.date_format, self.clock.now())?;

        self.state = WatcherState::Rendering;
        let lines: Vec<String> = entries.iter().map(TimetableEntry::text).collect();
        self.sink.render(&lines)?;

        Ok(lines.len())
    }

    /// Run cycles until `shutdown` is cancelled.
    ///
    /// Cancellation is honoured during a fetch and during the wait.
    pub async fn run(&mut self, shutdown: &CancellationToken) {
        info!(
            interval_secs = self.refresh.current_secs(),
            "watcher starting"
        );

        while !shutdown.is_cancelled() {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,
                _ = self.run_cycle() => {}
            }

            self.state = WatcherState::Waiting;
            if self.refresh.wait(shutdown).await == WaitOutcome::Cancelled {
                break;
            }
            self.state = WatcherState::Idle;
        }

        self.state = WatcherState::Stopped;
        info!(cycles = self.cycles, "watcher stopped");
    }
}
