//! Log level definitions

use super::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the label column in a rendered line.
pub const LABEL_WIDTH: usize = 6;

/// Output stream a line is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    /// Plain timestamped line without a label
    #[default]
    Log,
    Info,
    Warn,
    Debug,
    Error,
    Trace,
    Assert,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Log,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Debug,
        LogLevel::Error,
        LogLevel::Trace,
        LogLevel::Assert,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Log => "LOG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Error => "ERROR",
            LogLevel::Trace => "TRACE",
            LogLevel::Assert => "ASSERT",
        }
    }

    /// Label printed after the timestamp; `Log` lines carry none.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            LogLevel::Log => None,
            other => Some(other.to_str()),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LogLevel::Log => Color::Gray,
            LogLevel::Info => Color::Cyan,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Debug => Color::Magenta,
            LogLevel::Error | LogLevel::Trace => Color::Red,
            LogLevel::Assert => Color::Green,
        }
    }

    /// Default destination. A failed assertion is redirected to stderr by the logger.
    pub fn stream(&self) -> Stream {
        match self {
            LogLevel::Log | LogLevel::Info | LogLevel::Debug | LogLevel::Assert => Stream::Stdout,
            LogLevel::Warn | LogLevel::Error | LogLevel::Trace => Stream::Stderr,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOG" => Ok(LogLevel::Log),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "DEBUG" => Ok(LogLevel::Debug),
            "ERROR" => Ok(LogLevel::Error),
            "TRACE" => Ok(LogLevel::Trace),
            "ASSERT" => Ok(LogLevel::Assert),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_routing() {
        assert_eq!(LogLevel::Log.stream(), Stream::Stdout);
        assert_eq!(LogLevel::Info.stream(), Stream::Stdout);
        assert_eq!(LogLevel::Debug.stream(), Stream::Stdout);
        assert_eq!(LogLevel::Assert.stream(), Stream::Stdout);
        assert_eq!(LogLevel::Warn.stream(), Stream::Stderr);
        assert_eq!(LogLevel::Error.stream(), Stream::Stderr);
        assert_eq!(LogLevel::Trace.stream(), Stream::Stderr);
    }

    #[test]
    fn test_labels_fit_column() {
        assert_eq!(LogLevel::Log.label(), None);
        for level in LogLevel::ALL.iter().filter(|l| **l != LogLevel::Log) {
            let label = level.label().expect("labelled level");
            assert!(label.len() <= LABEL_WIDTH, "{} too wide", label);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Assert".parse::<LogLevel>(), Ok(LogLevel::Assert));
        assert!("fatal".parse::<LogLevel>().is_err());
    }
}
