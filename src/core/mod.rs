//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod stack_trace;
pub mod style;
pub mod timestamp;
pub mod value;

pub use appender::Appender;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_level::{LogLevel, Stream, LABEL_WIDTH};
pub use logger::{global, Logger, LoggerBuilder, EOL};
pub use stack_trace::ErrorTrace;
pub use style::{AnsiStyle, Color, ColorMode, PlainStyle, Style};
pub use timestamp::{Clock, FixedClock, SystemClock};
pub use value::Value;
