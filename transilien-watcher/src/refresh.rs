//! Adaptive polling interval.
//!
//! After a failed cycle the interval grows by a fixed step up to a ceiling,
//! easing off a struggling upstream. Any success snaps it back to the default
//! cadence so the display stays fresh.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::RefreshConfig;

/// How a [`RefreshController::wait`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full interval elapsed
    Elapsed,
    /// Shutdown was requested during the wait
    Cancelled,
}

/// Owns the polling interval.
///
/// Invariant: `default ≤ current ≤ max` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshController {
    current: u64,
    default: u64,
    step: u64,
    max: u64,
}

impl RefreshController {
    /// Create a controller starting at the default interval.
    ///
    /// A ceiling below the default is raised to the default.
    pub fn new(config: RefreshConfig) -> Self {
        let max = config.max.max(config.default);
        Self {
            current: config.default,
            default: config.default,
            step: config.step,
            max,
        }
    }

    /// Returns the current interval in seconds.
    pub fn current_secs(&self) -> u64 {
        self.current
    }

    /// Returns the current interval as a Duration.
    pub fn current_interval(&self) -> Duration {
        Duration::from_secs(self.current)
    }

    /// Back off after a failed cycle.
    pub fn increase(&mut self) {
        self.current = self.current.saturating_add(self.step).min(self.max);
        debug!(interval_secs = self.current, "refresh interval increased");
    }

    /// Return to the default cadence after a successful cycle.
    pub fn reset(&mut self) {
        self.current = self.default;
    }

    /// Sleep for the current interval, or until `shutdown` is cancelled.
    pub async fn wait(&self, shutdown: &CancellationToken) -> WaitOutcome {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => WaitOutcome::Cancelled,
            _ = tokio::time::sleep(self.current_interval()) => WaitOutcome::Elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn controller() -> RefreshController {
        RefreshController::new(RefreshConfig::new(10, 10, 30))
    }

    #[test]
    fn starts_at_default() {
        assert_eq!(controller().current_secs(), 10);
    }

    #[test]
    fn increase_climbs_and_clamps() {
        let mut refresh = controller();

        refresh.increase();
        assert_eq!(refresh.current_secs(), 20);
        refresh.increase();
        assert_eq!(refresh.current_secs(), 30);
        refresh.increase();
        assert_eq!(refresh.current_secs(), 30);
    }

    #[test]
    fn reset_returns_to_default() {
        let mut refresh = controller();
        refresh.reset();
        assert_eq!(refresh.current_secs(), 10);

        refresh.increase();
        refresh.reset();
        assert_eq!(refresh.current_secs(), 10);

        refresh.increase();
        refresh.increase();
        refresh.increase();
        refresh.reset();
        assert_eq!(refresh.current_secs(), 10);
    }

    #[test]
    fn step_not_dividing_range_still_hits_ceiling() {
        let mut refresh = RefreshController::new(RefreshConfig::new(10, 7, 30));
        refresh.increase();
        refresh.increase();
        assert_eq!(refresh.current_secs(), 24);
        refresh.increase();
        assert_eq!(refresh.current_secs(), 30);
    }

    #[test]
    fn zero_step_stays_put() {
        let mut refresh = RefreshController::new(RefreshConfig::new(10, 0, 30));
        refresh.increase();
        assert_eq!(refresh.current_secs(), 10);
    }

    #[test]
    fn ceiling_below_default_is_raised() {
        let mut refresh = RefreshController::new(RefreshConfig::new(30, 10, 10));
        refresh.increase();
        assert_eq!(refresh.current_secs(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_current_interval() {
        let mut refresh = controller();
        refresh.increase();
        let token = CancellationToken::new();

        let start = Instant::now();
        assert_eq!(refresh.wait(&token).await, WaitOutcome::Elapsed);
        assert!(start.elapsed() >= Duration::from_secs(20));
        assert!(start.elapsed() < Duration::from_secs(21));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_is_interrupted_by_cancellation() {
        let refresh = RefreshController::new(RefreshConfig::new(300, 10, 600));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        assert_eq!(refresh.wait(&token).await, WaitOutcome::Cancelled);
        assert!(start.elapsed() < Duration::from_secs(300));
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_already_cancelled() {
        let refresh = controller();
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(refresh.wait(&token).await, WaitOutcome::Cancelled);
    }
}
