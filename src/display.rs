//! Display surfaces: where each tick's line ends up.

use std::fmt;
use std::io::{self, Write};

use crate::fmt::format_metrics;
use crate::models::Metrics;

/// Text shown before the first tick completes.
pub const PLACEHOLDER_TEXT: &str = "Initialization";

/// Failure writing to a display surface.
#[derive(Debug)]
pub enum DisplayError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Io(e) => write!(f, "I/O error: {}", e),
            DisplayError::Serialize(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<io::Error> for DisplayError {
    fn from(e: io::Error) -> Self {
        DisplayError::Io(e)
    }
}

impl From<serde_json::Error> for DisplayError {
    fn from(e: serde_json::Error) -> Self {
        DisplayError::Serialize(e)
    }
}

/// A place the scheduler pushes display output to.
pub trait DisplaySurface {
    /// Replaces the visible text.
    fn set_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Shows one tick's metrics. Defaults to the formatted display line.
    fn show(&mut self, metrics: &Metrics) -> Result<(), DisplayError> {
        self.set_text(&format_metrics(metrics))
    }

    /// Called once when sampling stops.
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Writes one display line per update.
pub struct TextSurface<W: Write> {
    out: W,
    last: Option<String>,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    /// The most recent text set on the surface.
    pub fn text(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TextSurface<W> {
    fn set_text(&mut self, text: &str) -> Result<(), DisplayError> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        self.last = Some(text.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.last = None;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes each tick as a JSON object on its own line.
///
/// The placeholder text is not emitted, so every line parses as `Metrics`.
pub struct JsonSurface<W: Write> {
    out: W,
}

impl<W: Write> JsonSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for JsonSurface<W> {
    fn set_text(&mut self, _text: &str) -> Result<(), DisplayError> {
        Ok(())
    }

    fn show(&mut self, metrics: &Metrics) -> Result<(), DisplayError> {
        serde_json::to_writer(&mut self.out, metrics)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
