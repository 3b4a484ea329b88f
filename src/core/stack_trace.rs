//! Error values carrying a printable stack trace
//!
//! An [`ErrorTrace`] is what the logger's trace rendering consumes: an error
//! name, a message and a multi-line stack whose first line is the header
//! (`Name: message`) and whose remaining lines are call-site frames starting
//! with `at `.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Marker that opens every call-site frame line
pub const FRAME_MARKER: &str = "at ";

const SHORT_BACKTRACE_BEGIN: &str = "__rust_begin_short_backtrace";
const SHORT_BACKTRACE_END: &str = "__rust_end_short_backtrace";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTrace {
    name: String,
    message: String,
    stack: String,
}

impl ErrorTrace {
    /// Create an error and capture the current call stack as `at` frames.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let mut stack = header(&name, &message);
        push_frames(&mut stack, &Backtrace::force_capture());
        Self {
            name,
            message,
            stack,
        }
    }

    /// Wrap any error, naming it after its type and listing its `source()` chain.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let name = short_type_name(std::any::type_name::<E>());
        let message = error.to_string();
        let mut stack = header(&name, &message);

        let mut source = error.source();
        while let Some(cause) = source {
            stack.push('\n');
            stack.push_str("Caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        push_frames(&mut stack, &Backtrace::force_capture());

        Self {
            name,
            message,
            stack,
        }
    }

    /// Build an error from an already rendered stack.
    pub fn with_stack(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: stack.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Stack lines with surrounding whitespace trimmed, header first.
    pub fn frames(&self) -> Vec<&str> {
        self.stack.lines().map(str::trim).collect()
    }
}

impl fmt::Display for ErrorTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&header(&self.name, &self.message))
    }
}

impl std::error::Error for ErrorTrace {}

fn header(name: &str, message: &str) -> String {
    if message.is_empty() {
        name.to_string()
    } else {
        format!("{}: {}", name, message)
    }
}

/// `core::num::error::ParseIntError` becomes `ParseIntError`.
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

fn push_frames(stack: &mut String, backtrace: &Backtrace) {
    if backtrace.status() != BacktraceStatus::Captured {
        return;
    }
    for frame in parse_backtrace(&backtrace.to_string()) {
        stack.push('\n');
        stack.push_str("    ");
        stack.push_str(&frame);
    }
}

/// Convert the standard library's backtrace text into `at symbol (file:line:col)` lines.
///
/// Frames belonging to the capture machinery itself are dropped, and the list
/// is cut to the span std's short backtrace format shows: after any
/// `__rust_end_short_backtrace` frame and before `__rust_begin_short_backtrace`.
fn parse_backtrace(rendered: &str) -> Vec<String> {
    let mut frames: Vec<(String, Option<String>)> = Vec::new();

    for line in rendered.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix(FRAME_MARKER) {
            if let Some(last) = frames.last_mut() {
                if last.1.is_none() {
                    last.1 = Some(location.trim_start_matches("./").to_string());
                }
            }
            continue;
        }
        let Some((index, symbol)) = line.split_once(": ") else {
            continue;
        };
        if index.chars().all(|c| c.is_ascii_digit()) && !index.is_empty() {
            frames.push((symbol.to_string(), None));
        }
    }

    if let Some(end) = frames
        .iter()
        .position(|(symbol, _)| symbol.contains(SHORT_BACKTRACE_END))
    {
        frames.drain(..=end);
    }

    frames
        .into_iter()
        .take_while(|(symbol, _)| !symbol.contains(SHORT_BACKTRACE_BEGIN))
        .filter(|(symbol, _)| !is_capture_frame(symbol))
        .map(|(symbol, location)| match location {
            Some(location) => format!("{}{} ({})", FRAME_MARKER, symbol, location),
            None => format!("{}{}", FRAME_MARKER, symbol),
        })
        .collect()
}

fn is_capture_frame(symbol: &str) -> bool {
    symbol.starts_with("std::backtrace")
        || symbol.contains("stack_trace::ErrorTrace::")
        || symbol.contains("stack_trace::push_frames")
}
