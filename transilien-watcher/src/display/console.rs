//! Terminal output.

use std::io::Write;

use super::error::DisplayError;

/// Prints each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    /// Create a console display.
    pub fn new() -> Self {
        Self
    }

    /// Write each line, newline-terminated, to standard output.
    pub fn render(&self, lines: &[String]) -> Result<(), DisplayError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.render_to(&mut out, lines)
    }

    /// Write each line, newline-terminated, to `out`.
    pub fn render_to<W: Write>(&self, out: &mut W, lines: &[String]) -> Result<(), DisplayError> {
        for line in lines {
            writeln!(out, "{line}").map_err(DisplayError::Console)?;
        }
        out.flush().map_err(DisplayError::Console)
    }
}
