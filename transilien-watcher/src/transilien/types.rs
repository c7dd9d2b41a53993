//! Departure board records.
//!
//! A board is a `<passages>` document with one `<train>` element per
//! upcoming departure:
//!
//! ```xml
//! <passages gare="87393009">
//!   <train>
//!     <date mode="R">27/10/2018 21:39</date>
//!     <num>135140</num>
//!     <miss>DACA</miss>
//!     <term>87384008</term>
//!     <etat>Retardé</etat>
//!   </train>
//! </passages>
//! ```
//!
//! `mode` is "R" for real-time and "T" for theoretical times. `etat` is only
//! present when the train is delayed or cancelled.

use chrono::NaiveDateTime;

use crate::domain::{Mission, TimetableEntry};

/// One train read from a departure board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Mission code (`<miss>`).
    pub mission: Mission,

    /// Scheduled departure time (`<date>`), local time.
    pub scheduled: NaiveDateTime,

    /// Whether the time is real-time rather than theoretical (`mode="R"`).
    pub real_time: bool,

    /// Train number (`<num>`).
    pub number: Option<String>,

    /// Terminus station code (`<term>`).
    pub terminus: Option<String>,

    /// Real-time state (`<etat>`), e.g. "Retardé" or "Supprimé".
    pub status: Option<String>,
}

impl Departure {
    /// Convert to a display entry with the countdown as seen at `now`.
    pub fn to_entry(&self, now: NaiveDateTime) -> TimetableEntry {
        let entry = TimetableEntry::at(self.mission.clone(), self.scheduled, now);
        match &self.status {
            Some(status) => entry.with_status(status.clone()),
            None => entry,
        }
    }
}
