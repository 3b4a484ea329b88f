//! Main logger implementation

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_level::{LogLevel, Stream, LABEL_WIDTH},
    stack_trace::{ErrorTrace, FRAME_MARKER},
    style::{Color, ColorMode, Style},
    timestamp::{timestamp, Clock, SystemClock},
    value::{join, Value},
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::sync::OnceLock;

/// Platform line terminator
#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

/// Leveled, timestamped writer over two fixed output streams
///
/// Every operation writes synchronously and returns the logger so calls chain:
///
/// ```
/// use stamp_log::prelude::*;
///
/// let out = MemoryAppender::new();
/// let logger = Logger::builder()
///     .stdout(out.clone())
///     .color_mode(ColorMode::Never)
///     .build();
///
/// logger.info("listening", &[Value::from(8080)])?.eol()?;
/// assert!(out.lines()[0].ends_with("  INFO listening 8080"));
/// # Ok::<(), stamp_log::LoggerError>(())
/// ```
pub struct Logger {
    stdout: Mutex<Box<dyn Appender>>,
    stderr: Mutex<Box<dyn Appender>>,
    style: Box<dyn Style>,
    clock: Box<dyn Clock>,
}

impl Logger {
    /// Logger over the process's stdout and stderr
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Write the platform line terminator to stdout, without any prefix.
    pub fn eol(&self) -> Result<&Self> {
        self.stdout.lock().write_str(EOL)?;
        Ok(self)
    }

    /// `[ts] message rest..` to stdout
    pub fn log(&self, message: impl Into<Value>, rest: &[Value]) -> Result<&Self> {
        self.leveled(LogLevel::Log, message.into(), rest)
    }

    pub fn info(&self, message: impl Into<Value>, rest: &[Value]) -> Result<&Self> {
        self.leveled(LogLevel::Info, message.into(), rest)
    }

    pub fn warn(&self, message: impl Into<Value>, rest: &[Value]) -> Result<&Self> {
        self.leveled(LogLevel::Warn, message.into(), rest)
    }

    pub fn debug(&self, message: impl Into<Value>, rest: &[Value]) -> Result<&Self> {
        self.leveled(LogLevel::Debug, message.into(), rest)
    }

    /// ERROR line to stderr, or the full trace when `message` is an error value.
    ///
    /// In the trace case `rest` is not written.
    pub fn error(&self, message: impl Into<Value>, rest: &[Value]) -> Result<&Self> {
        match message.into() {
            Value::Error(err) => self.trace_error(&err),
            other => self.leveled(LogLevel::Error, other, rest),
        }
    }

    /// Write an error's stack to stderr, one line per frame.
    ///
    /// A non-error value is reported with a single ERROR line instead.
    pub fn trace(&self, error: impl Into<Value>) -> Result<&Self> {
        match error.into() {
            Value::Error(err) => self.trace_error(&err),
            other => self.error(misuse_message(&other), &[]),
        }
    }

    /// Green ASSERT line to stdout when `value` is truthy, red to stderr otherwise.
    ///
    /// Neither outcome panics.
    pub fn assert(
        &self,
        value: impl Into<Value>,
        message: impl Into<Value>,
        rest: &[Value],
    ) -> Result<&Self> {
        let value = value.into();
        let passed = value.is_truthy();
        let body = body(&format!("{} {}", value, message.into()), rest);
        let (color, stream) = if passed {
            (Color::Green, Stream::Stdout)
        } else {
            (Color::Red, Stream::Stderr)
        };
        let line = self.compose(Some((LogLevel::Assert.to_str(), color)), &body);
        self.write_line(stream, &line)?;
        Ok(self)
    }

    pub fn flush(&self) -> Result<()> {
        self.stdout.lock().flush()?;
        self.stderr.lock().flush()?;
        Ok(())
    }

    /// Render the line a leveled call would emit, without writing it.
    ///
    /// `Assert` renders its passing form.
    pub fn render_line(&self, level: LogLevel, message: impl Into<Value>, rest: &[Value]) -> String {
        let body = body(&message.into().to_string(), rest);
        let label = level.label().map(|label| (label, level.color()));
        self.compose(label, &body)
    }

    /// Render the lines `trace` would emit for `error`, without writing them.
    pub fn render_trace(&self, error: &ErrorTrace) -> Vec<String> {
        let header = error.to_string();
        let mut frames = error.frames();
        if frames.is_empty() {
            frames.push(&header);
        }
        frames
            .into_iter()
            .enumerate()
            .map(|(index, frame)| {
                if index == 0 {
                    self.compose(
                        Some((LogLevel::Trace.to_str(), LogLevel::Trace.color())),
                        frame,
                    )
                } else {
                    let frame = match frame.strip_prefix(FRAME_MARKER) {
                        Some(site) => {
                            format!("{}{}", self.style.paint(FRAME_MARKER, Color::Yellow), site)
                        }
                        None => frame.to_string(),
                    };
                    format!("{} {:width$} {}", self.stamp(), "", frame, width = LABEL_WIDTH)
                }
            })
            .collect()
    }

    fn leveled(&self, level: LogLevel, message: Value, rest: &[Value]) -> Result<&Self> {
        let line = self.render_line(level, message, rest);
        self.write_line(level.stream(), &line)?;
        Ok(self)
    }

    fn trace_error(&self, error: &ErrorTrace) -> Result<&Self> {
        for line in self.render_trace(error) {
            self.write_line(Stream::Stderr, &line)?;
        }
        Ok(self)
    }

    /// Gray `[timestamp]` read from the clock at call time
    fn stamp(&self) -> String {
        let now = self.clock.now();
        self.style
            .paint(&format!("[{}]", timestamp(&now)), Color::Gray)
    }

    fn compose(&self, label: Option<(&str, Color)>, body: &str) -> String {
        match label {
            Some((label, color)) => {
                let tag = format!("{:>width$}", label, width = LABEL_WIDTH);
                format!("{} {} {}", self.stamp(), self.style.paint(&tag, color), body)
            }
            None => format!("{} {}", self.stamp(), body),
        }
    }

    fn write_line(&self, stream: Stream, line: &str) -> Result<()> {
        let mut text = String::with_capacity(line.len() + EOL.len());
        text.push_str(line);
        text.push_str(EOL);

        let target = match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        };
        let mut appender = target.lock();
        appender.write_str(&text).map_err(|e| match e {
            LoggerError::IoError(source) => LoggerError::io_operation(
                format!("writing to {}", appender.name()),
                "log line not written",
                source,
            ),
            other => other,
        })
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn body(message: &str, rest: &[Value]) -> String {
    if rest.is_empty() {
        message.to_string()
    } else {
        format!("{} {}", message, join(rest))
    }
}

fn misuse_message(value: &Value) -> String {
    format!(
        "TypeError: {} {} is not an instance of Error.",
        value.type_name(),
        value
    )
}

/// Process-wide logger over the console streams, created on first use
///
/// Components should still receive a `&Logger` explicitly; this is for
/// binaries that want one shared instance.
pub fn global() -> &'static Logger {
    static GLOBAL: OnceLock<Logger> = OnceLock::new();
    GLOBAL.get_or_init(Logger::new)
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use stamp_log::prelude::*;
///
/// let logger = Logger::builder()
///     .stdout(MemoryAppender::new())
///     .stderr(MemoryAppender::new())
///     .color_mode(ColorMode::Never)
///     .build();
/// ```
pub struct LoggerBuilder {
    stdout: Option<Box<dyn Appender>>,
    stderr: Option<Box<dyn Appender>>,
    style: Option<Box<dyn Style>>,
    color_mode: ColorMode,
    clock: Option<Box<dyn Clock>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            stdout: None,
            stderr: None,
            style: None,
            color_mode: ColorMode::Auto,
            clock: None,
        }
    }

    /// Replace the standard output stream
    #[must_use = "builder methods return a new value"]
    pub fn stdout<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.stdout = Some(Box::new(appender));
        self
    }

    /// Replace the standard error stream
    #[must_use = "builder methods return a new value"]
    pub fn stderr<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.stderr = Some(Box::new(appender));
        self
    }

    /// Use a custom style. Takes precedence over the color mode.
    #[must_use = "builder methods return a new value"]
    pub fn style<S: Style + 'static>(mut self, style: S) -> Self {
        self.style = Some(Box::new(style));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Apply loaded configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: &LoggerConfig) -> Self {
        self.color_mode = config.color;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            stdout: Mutex::new(
                self.stdout
                    .unwrap_or_else(|| Box::new(ConsoleAppender::stdout())),
            ),
            stderr: Mutex::new(
                self.stderr
                    .unwrap_or_else(|| Box::new(ConsoleAppender::stderr())),
            ),
            style: self.style.unwrap_or_else(|| self.color_mode.style()),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::timestamp::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    const TS: &str = "[2025-01-08 10:30:45.123]";

    struct Harness {
        out: MemoryAppender,
        err: MemoryAppender,
        logger: Logger,
    }

    fn harness() -> Harness {
        let out = MemoryAppender::new();
        let err = MemoryAppender::new();
        let at = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        let logger = Logger::builder()
            .stdout(out.clone())
            .stderr(err.clone())
            .color_mode(ColorMode::Never)
            .clock(FixedClock(at))
            .build();
        Harness { out, err, logger }
    }

    fn boom() -> ErrorTrace {
        ErrorTrace::with_stack(
            "Error",
            "boom",
            "Error: boom\n    at handler (src/app.rs:10:5)\n    at main (src/main.rs:3:1)",
        )
    }

    #[test]
    fn test_log_has_no_label() {
        let h = harness();
        h.logger.log("plain", &[]).expect("log");
        assert_eq!(h.out.lines(), vec![format!("{} plain", TS)]);
        assert!(h.err.is_empty());
    }

    #[test]
    fn test_labels_are_right_aligned() {
        let h = harness();
        h.logger
            .info("a", &[])
            .and_then(|l| l.debug("b", &[]))
            .expect("write");
        assert_eq!(
            h.out.lines(),
            vec![format!("{}   INFO a", TS), format!("{}  DEBUG b", TS)]
        );
    }

    #[test]
    fn test_warn_and_error_go_to_stderr() {
        let h = harness();
        h.logger.warn("careful", &[]).expect("warn");
        h.logger.error("failed", &[Value::from(500)]).expect("error");
        assert!(h.out.is_empty());
        assert_eq!(
            h.err.lines(),
            vec![format!("{}   WARN careful", TS), format!("{}  ERROR failed 500", TS)]
        );
    }

    #[test]
    fn test_rest_values_are_space_joined() {
        let h = harness();
        h.logger
            .info("user", &[Value::from(42), Value::from("logged in"), Value::from(true)])
            .expect("info");
        assert_eq!(h.out.lines(), vec![format!("{}   INFO user 42 logged in true", TS)]);
    }

    #[test]
    fn test_eol_chains() -> Result<()> {
        let h = harness();
        h.logger.info("x", &[])?.eol()?;
        assert_eq!(h.out.contents(), format!("{}   INFO x{}{}", TS, EOL, EOL));
        Ok(())
    }

    #[test]
    fn test_trace_layout() {
        let h = harness();
        h.logger.trace(boom()).expect("trace");
        assert_eq!(
            h.err.lines(),
            vec![
                format!("{}  TRACE Error: boom", TS),
                format!("{}        at handler (src/app.rs:10:5)", TS),
                format!("{}        at main (src/main.rs:3:1)", TS),
            ]
        );
        assert!(h.out.is_empty());
    }

    #[test]
    fn test_trace_header_found_by_position() {
        let h = harness();
        let err = ErrorTrace::with_stack("Error", "x", "Error: x\nError: x");
        h.logger.trace(err).expect("trace");
        let lines = h.err.lines();
        assert!(lines[0].contains("TRACE"));
        assert!(!lines[1].contains("TRACE"));
    }

    #[test]
    fn test_error_delegates_to_trace() {
        let via_error = harness();
        via_error
            .logger
            .error(boom(), &[Value::from("dropped")])
            .expect("error");

        let via_trace = harness();
        via_trace.logger.trace(boom()).expect("trace");

        assert_eq!(via_error.err.contents(), via_trace.err.contents());
        assert!(!via_error.err.contents().contains("dropped"));
    }

    #[test]
    fn test_trace_empty_stack_still_has_header() {
        let h = harness();
        h.logger
            .trace(ErrorTrace::with_stack("RangeError", "out of bounds", ""))
            .expect("trace");
        assert_eq!(
            h.err.lines(),
            vec![format!("{}  TRACE RangeError: out of bounds", TS)]
        );
    }

    #[test]
    fn test_trace_rejects_non_errors() {
        let h = harness();
        h.logger.trace(42).expect("misuse is not fatal");
        assert_eq!(
            h.err.lines(),
            vec![format!(
                "{}  ERROR TypeError: number 42 is not an instance of Error.",
                TS
            )]
        );
    }

    #[test]
    fn test_assert_outcomes() -> Result<()> {
        let h = harness();
        h.logger
            .assert(true, "ok", &[])?
            .assert(false, "fail", &[Value::from(1)])?;
        assert_eq!(h.out.lines(), vec![format!("{} ASSERT true ok", TS)]);
        assert_eq!(h.err.lines(), vec![format!("{} ASSERT false fail 1", TS)]);
        Ok(())
    }

    #[test]
    fn test_colored_trace_marks_call_sites() {
        let err = MemoryAppender::new();
        let logger = Logger::builder()
            .stdout(MemoryAppender::new())
            .stderr(err.clone())
            .color_mode(ColorMode::Always)
            .build();
        logger.trace(boom()).expect("trace");

        let lines = err.lines();
        assert!(lines[0].contains("\x1b[31m TRACE\x1b[0m"));
        assert!(lines[1].contains("\x1b[33mat \x1b[0mhandler"));
    }

    #[test]
    fn test_assert_colors() {
        let out = MemoryAppender::new();
        let err = MemoryAppender::new();
        let logger = Logger::builder()
            .stdout(out.clone())
            .stderr(err.clone())
            .color_mode(ColorMode::Always)
            .build();
        logger.assert(1, "pass", &[]).expect("assert");
        logger.assert(0, "fail", &[]).expect("assert");
        assert!(out.contents().contains("\x1b[32mASSERT\x1b[0m"));
        assert!(err.contents().contains("\x1b[31mASSERT\x1b[0m"));
    }

    /// Advances one millisecond each time it is read
    struct TickingClock {
        start: chrono::DateTime<Utc>,
        ticks: AtomicI64,
    }

    impl Clock for TickingClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
            self.start + chrono::Duration::milliseconds(tick)
        }
    }

    #[test]
    fn test_each_line_reads_the_clock() {
        let err = MemoryAppender::new();
        let start = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        let logger = Logger::builder()
            .stdout(MemoryAppender::new())
            .stderr(err.clone())
            .color_mode(ColorMode::Never)
            .clock(TickingClock {
                start,
                ticks: AtomicI64::new(0),
            })
            .build();

        logger.trace(boom()).expect("trace");
        logger.warn("after", &[]).expect("warn");

        let stamps: Vec<String> = err.lines().iter().map(|l| l[..25].to_string()).collect();
        assert_eq!(
            stamps,
            vec![
                "[2025-01-08 10:30:45.000]",
                "[2025-01-08 10:30:45.001]",
                "[2025-01-08 10:30:45.002]",
                "[2025-01-08 10:30:45.003]",
            ]
        );
    }

    #[test]
    fn test_builder_applies_loaded_config() -> Result<()> {
        let out = MemoryAppender::new();
        let config = LoggerConfig::from_json_str(r#"{"color":"never"}"#)?;
        let logger = Logger::builder()
            .stdout(out.clone())
            .stderr(MemoryAppender::new())
            .color_mode(ColorMode::Always)
            .config(&config)
            .build();

        logger.info("plain", &[])?;
        let contents = out.contents();
        assert!(!contents.contains('\x1b'));
        assert!(contents.ends_with(&format!("  INFO plain{}", EOL)));
        Ok(())
    }

    /// Wraps every fragment in angle brackets tagged with its color
    struct BracketStyle;

    impl Style for BracketStyle {
        fn paint(&self, text: &str, color: Color) -> String {
            format!("<{:?}:{}>", color, text)
        }
    }

    #[test]
    fn test_custom_style_overrides_color_mode() -> Result<()> {
        let out = MemoryAppender::new();
        let logger = Logger::builder()
            .stdout(out.clone())
            .stderr(MemoryAppender::new())
            .color_mode(ColorMode::Always)
            .style(BracketStyle)
            .clock(FixedClock(
                Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
                    .single()
                    .expect("valid datetime"),
            ))
            .build();

        logger.info("styled", &[])?;
        assert_eq!(
            out.lines(),
            vec!["<Gray:[2025-01-08 10:30:45.000]> <Cyan:  INFO> styled"]
        );
        Ok(())
    }

    #[test]
    fn test_trace_of_null_reports_object() {
        let h = harness();
        h.logger.trace(Value::Null).expect("misuse is not fatal");
        assert_eq!(
            h.err.lines(),
            vec![format!(
                "{}  ERROR TypeError: object null is not an instance of Error.",
                TS
            )]
        );
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}
