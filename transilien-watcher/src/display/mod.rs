//! Output devices.
//!
//! The watcher hands each device a list of pre-formatted lines. Which device
//! is used is decided once at startup from the `device.type` setting.

mod console;
mod error;
mod lcd;

use tracing::info;

use crate::config::DeviceConfig;

pub use console::ConsoleDisplay;
pub use error::DisplayError;
pub use lcd::LcdDisplay;

/// A configured output device.
#[derive(Debug, Clone)]
pub enum Display {
    /// Standard output, one line per entry
    Console(ConsoleDisplay),
    /// Character LCD behind a `charlcd` device node
    Lcd(LcdDisplay),
}

impl Display {
    /// Pick the device named by `device.kind`.
    ///
    /// Unknown types fail here, at startup, before anything is fetched.
    pub fn select(device: &DeviceConfig) -> Result<Self, DisplayError> {
        let selected = match device.kind.as_str() {
            "console" => Display::Console(ConsoleDisplay::new()),
            "lcd" => Display::Lcd(LcdDisplay::from(&device.lcd)),
            other => return Err(DisplayError::UnsupportedType(other.to_string())),
        };

        info!(device = selected.name(), "selected display");
        Ok(selected)
    }

    /// Returns the device type tag.
    pub fn name(&self) -> &'static str {
        match self {
            Display::Console(_) => "console",
            Display::Lcd(_) => "lcd",
        }
    }

    /// Show `lines` on the device.
    pub fn render(&self, lines: &[String]) -> Result<(), DisplayError> {
        match self {
            Display::Console(console) => console.render(lines),
            Display::Lcd(lcd) => lcd.render(lines),
        }
    }
}
