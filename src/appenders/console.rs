//! Console appender implementation

use crate::core::{Appender, Result, Stream};
use std::io::Write;

/// Writes to the process's standard output or standard error.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleAppender {
    stream: Stream,
}

impl ConsoleAppender {
    pub fn new(stream: Stream) -> Self {
        Self { stream }
    }

    pub fn stdout() -> Self {
        Self::new(Stream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(Stream::Stderr)
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Appender for ConsoleAppender {
    fn write_str(&mut self, text: &str) -> Result<()> {
        // The std handles lock internally for the duration of each call
        match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(text.as_bytes())?,
            Stream::Stderr => std::io::stderr().lock().write_all(text.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
