//! # stamp_log
//!
//! A leveled, timestamped, color-coded console logger.
//!
//! ## Features
//!
//! - **Two streams**: info, debug and plain lines go to stdout; warnings,
//!   errors and traces go to stderr
//! - **Stack traces**: errors are rendered frame by frame with aligned columns
//! - **Assertions**: passing and failing checks are both logged, never fatal
//! - **Request timing**: one line per HTTP request with its status and latency

pub mod appenders;
pub mod core;
pub mod macros;
pub mod middleware;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
    pub use crate::core::{
        global, Appender, Clock, Color, ColorMode, ErrorTrace, FixedClock, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, Result, Stream, Style, SystemClock, Value,
    };
    pub use crate::middleware::{RequestCompletion, RequestTimer, RequestTimingAdapter};
}

pub use appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
pub use crate::core::{
    global, AnsiStyle, Appender, Clock, Color, ColorMode, ErrorTrace, FixedClock, LogLevel,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, PlainStyle, Result, Stream, Style,
    SystemClock, Value, EOL,
};
pub use middleware::{RequestCompletion, RequestTimer, RequestTimingAdapter};
