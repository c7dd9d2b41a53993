//! Source of the current time.
//!
//! Countdowns are computed against a reference instant. Passing a [`Clock`]
//! around instead of reading the system time directly lets tests pin "now".

use chrono::{Local, NaiveDateTime};

/// Something that can tell the current local wall-clock time.
///
/// The Transilien feed publishes naive local times, so clocks return a
/// `NaiveDateTime` in the same frame.
pub trait Clock {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;
}

/// The real clock, backed by the host's local time zone.
///
/// The feed publishes Europe/Paris wall-clock times, so the host must run in
/// that zone (e.g. `TZ=Europe/Paris`). Elsewhere every countdown is off by
/// the zone offset, in whole hours.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
