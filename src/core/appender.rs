//! Appender trait for log output destinations

use super::error::Result;

/// One output stream. The logger owns two: stdout and stderr.
pub trait Appender: Send {
    /// Write already rendered text, terminator included, in a single call.
    fn write_str(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
