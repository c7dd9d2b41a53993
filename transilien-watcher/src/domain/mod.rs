//! Domain types for the departure watcher.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod clock;
mod countdown;
mod mission;
mod station;
mod timetable;

pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::format_countdown;
pub use mission::{InvalidMission, Mission};
pub use station::{InvalidStationCode, StationCode};
pub use timetable::TimetableEntry;
