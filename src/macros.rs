//! Logging macros for variadic arguments.
//!
//! Each macro takes the logger, a message and any number of trailing values,
//! converts the trailing values with `Value::from` and calls the matching
//! method. The macro evaluates to that method's `Result`.
//!
//! # Examples
//!
//! ```
//! use stamp_log::prelude::*;
//! use stamp_log::info;
//!
//! let logger = Logger::builder().stdout(MemoryAppender::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started")?;
//!
//! // With trailing values
//! let port = 8080;
//! info!(logger, "Server listening on port", port)?;
//! # Ok::<(), stamp_log::LoggerError>(())
//! ```

/// Plain timestamped line.
///
/// ```
/// # use stamp_log::prelude::*;
/// # let logger = Logger::builder().stdout(MemoryAppender::new()).build();
/// use stamp_log::log;
/// log!(logger, "Simple message").unwrap();
/// log!(logger, "Items:", 3, "pending").unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $message:expr $(, $rest:expr)* $(,)?) => {
        $logger.log($message, &[$($crate::Value::from($rest)),*])
    };
}

/// Info line to stdout.
#[macro_export]
macro_rules! info {
    ($logger:expr, $message:expr $(, $rest:expr)* $(,)?) => {
        $logger.info($message, &[$($crate::Value::from($rest)),*])
    };
}

/// Warning line to stderr.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $message:expr $(, $rest:expr)* $(,)?) => {
        $logger.warn($message, &[$($crate::Value::from($rest)),*])
    };
}

/// Debug line to stdout.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $message:expr $(, $rest:expr)* $(,)?) => {
        $logger.debug($message, &[$($crate::Value::from($rest)),*])
    };
}

/// Error line to stderr; an `ErrorTrace` message prints its stack instead.
///
/// ```
/// # use stamp_log::prelude::*;
/// # let logger = Logger::builder().stderr(MemoryAppender::new()).build();
/// use stamp_log::error;
/// error!(logger, "Failed to connect to database").unwrap();
/// error!(logger, ErrorTrace::new("Error", "connection refused")).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $message:expr $(, $rest:expr)* $(,)?) => {
        $logger.error($message, &[$($crate::Value::from($rest)),*])
    };
}

/// Stack trace of an error value.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $error:expr $(,)?) => {
        $logger.trace($error)
    };
}

/// Logged assertion; never panics.
///
/// ```
/// # use stamp_log::prelude::*;
/// # let logger = Logger::builder()
/// #     .stdout(MemoryAppender::new())
/// #     .stderr(MemoryAppender::new())
/// #     .build();
/// use stamp_log::assert_log;
/// let queue: Vec<u32> = Vec::new();
/// assert_log!(logger, queue.is_empty(), "queue drained").unwrap();
/// assert_log!(logger, queue.len(), "items remaining", "after shutdown").unwrap();
/// ```
#[macro_export]
macro_rules! assert_log {
    ($logger:expr, $value:expr, $message:expr $(, $rest:expr)* $(,)?) => {
        $logger.assert($value, $message, &[$($crate::Value::from($rest)),*])
    };
}
