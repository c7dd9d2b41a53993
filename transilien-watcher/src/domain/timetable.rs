//! Timetable entries shown on the display.

use std::fmt;

use chrono::NaiveDateTime;

use super::Mission;
use super::countdown::format_countdown;

/// One upcoming departure, ready to display.
///
/// Built by the schedule parser for each train in a board and consumed by
/// the display in the same cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEntry {
    mission: Mission,
    countdown: String,
    status: Option<String>,
}

impl TimetableEntry {
    /// Create an entry from an already formatted countdown.
    pub fn new(mission: Mission, countdown: impl Into<String>) -> Self {
        Self {
            mission,
            countdown: countdown.into(),
            status: None,
        }
    }

    /// Create an entry for a train scheduled at `scheduled`, as seen at `now`.
    pub fn at(mission: Mission, scheduled: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self::new(mission, format_countdown(scheduled - now))
    }

    /// Attach the real-time status reported by the feed (e.g. "Retardé").
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the mission code.
    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    /// Returns the formatted countdown.
    pub fn countdown(&self) -> &str {
        &self.countdown
    }

    /// Returns the real-time status, if the feed provided one.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns the display line, e.g. `"DACA: 8h"`.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimetableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.mission, self.countdown)
    }
}
