//! Character LCD output.
//!
//! Drives a character display through the Linux `charlcd` device node
//! (usually `/dev/lcd`). The driver interprets a small escape language:
//! form feed clears the screen and homes the cursor, and
//! `ESC [ L x<col> y<row> ;` moves the cursor.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::config::LcdConfig;

use super::error::DisplayError;

/// Clear screen and home the cursor.
const CLEAR: u8 = 0x0c;

/// Shown in place of characters the display cannot draw.
const REPLACEMENT: char = '?';

/// A `columns × rows` character display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdDisplay {
    columns: u16,
    rows: u16,
    path: PathBuf,
}

impl LcdDisplay {
    /// Create a display driver. The device is opened on each render.
    pub fn new(columns: u16, rows: u16, path: impl Into<PathBuf>) -> Self {
        Self {
            columns,
            rows,
            path: path.into(),
        }
    }

    /// Returns the device path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `(columns, rows)`.
    pub fn geometry(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    /// Build the byte stream that shows `lines`.
    ///
    /// One line per row, truncated to the row width. Lines beyond the last
    /// row are dropped. Non-ASCII characters are replaced.
    pub fn frame(&self, lines: &[String]) -> Vec<u8> {
        let mut frame = vec![CLEAR];

        for (row, line) in lines.iter().take(self.rows as usize).enumerate() {
            frame.extend_from_slice(format!("\x1b[Lx0y{row};").as_bytes());
            let text: String = line
                .chars()
                .take(self.columns as usize)
                .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { REPLACEMENT })
                .collect();
            frame.extend_from_slice(text.as_bytes());
        }

        frame
    }

    /// Show `lines` on the device.
    pub fn render(&self, lines: &[String]) -> Result<(), DisplayError> {
        let frame = self.frame(lines);
        trace!(path = %self.path.display(), bytes = frame.len(), "writing LCD frame");

        let io_err = |source: std::io::Error| DisplayError::Lcd {
            path: self.path.clone(),
            source,
        };

        let mut device = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(io_err)?;
        device.write_all(&frame).map_err(io_err)?;
        device.flush().map_err(io_err)
    }
}

impl From<&LcdConfig> for LcdDisplay {
    fn from(config: &LcdConfig) -> Self {
        Self::new(config.columns, config.rows, &config.path)
    }
}
