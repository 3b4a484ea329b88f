//! Basic logger usage example
//!
//! Demonstrates every level, trace rendering, assertions and request timing.
//!
//! Run with: cargo run --example basic_usage

use stamp_log::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    let logger = Arc::new(Logger::new());

    logger
        .log("plain line", &[])?
        .info("server starting on port", &[Value::from(8080)])?
        .debug("config loaded from", &[Value::from("./app.json")])?
        .warn("cache disabled", &[])?
        .error("upstream refused connection", &[Value::from(111)])?
        .eol()?;

    let parse_err = "forty-two".parse::<i32>().unwrap_err();
    logger.error(ErrorTrace::from_error(&parse_err), &[])?;
    logger.trace(42)?;

    logger
        .assert(1 + 1 == 2, "arithmetic holds", &[])?
        .assert(Value::Null, "session present", &[])?
        .eol()?;

    let timing = RequestTimingAdapter::new(Arc::clone(&logger));
    let request = http::Request::get("/users/7").body(()).expect("valid request");
    timing.handle(request, |_req| {
        http::Response::builder()
            .status(http::StatusCode::NOT_FOUND)
            .body(())
            .expect("valid response")
    })?;

    logger.flush()
}
