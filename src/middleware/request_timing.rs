//! Request timing adapter
//!
//! Emits exactly one line per HTTP request once its response exists:
//! `METHOD PATH STATUS ELAPSEDms`, at a level chosen from the status code.

use crate::core::{LogLevel, Logger, Result};
use http::{Method, Request, Response, StatusCode};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Everything known about a finished request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestCompletion {
    pub method: Method,
    /// Request target, query string included
    pub path: String,
    pub status: StatusCode,
    pub elapsed_ms: f64,
}

impl RequestCompletion {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        status: StatusCode,
        elapsed_ms: f64,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            status,
            elapsed_ms,
        }
    }

    /// 5xx is an error, 4xx a warning, anything else informational
    pub fn level(&self) -> LogLevel {
        match self.status.as_u16() {
            500..=u16::MAX => LogLevel::Error,
            400..=499 => LogLevel::Warn,
            _ => LogLevel::Info,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "{} {} {} {:.3}ms",
            self.method.as_str(),
            self.path,
            self.status.as_u16(),
            self.elapsed_ms
        )
    }
}

/// Logs request completions through a shared [`Logger`]
///
/// # Example
///
/// ```
/// use stamp_log::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::builder().stdout(MemoryAppender::new()).build());
/// let timing = RequestTimingAdapter::new(logger);
///
/// let request = http::Request::get("/users").body(()).unwrap();
/// let response = timing
///     .handle(request, |_req| http::Response::new("ok"))
///     .unwrap();
/// assert_eq!(response.status(), http::StatusCode::OK);
/// ```
#[derive(Clone)]
pub struct RequestTimingAdapter {
    logger: Arc<Logger>,
}

impl RequestTimingAdapter {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Completion hook: one line at the level the status selects
    pub fn on_complete(&self, completion: &RequestCompletion) -> Result<()> {
        let message = completion.message();
        match completion.level() {
            LogLevel::Error => self.logger.error(message, &[])?,
            LogLevel::Warn => self.logger.warn(message, &[])?,
            _ => self.logger.info(message, &[])?,
        };
        Ok(())
    }

    /// Start timing a request
    pub fn start<B>(&self, request: &Request<B>) -> RequestTimer {
        RequestTimer {
            adapter: self.clone(),
            method: request.method().clone(),
            path: request_target(request),
            started: Instant::now(),
        }
    }

    /// Run a handler and log its response
    pub fn handle<B, R, F>(&self, request: Request<B>, handler: F) -> Result<Response<R>>
    where
        F: FnOnce(Request<B>) -> Response<R>,
    {
        let timer = self.start(&request);
        let response = handler(request);
        timer.finish(&response)?;
        Ok(response)
    }

    /// Await a handler's future and log its response
    pub async fn handle_async<B, R, F, Fut>(
        &self,
        request: Request<B>,
        handler: F,
    ) -> Result<Response<R>>
    where
        F: FnOnce(Request<B>) -> Fut,
        Fut: Future<Output = Response<R>>,
    {
        let timer = self.start(&request);
        let response = handler(request).await;
        timer.finish(&response)?;
        Ok(response)
    }
}

/// An in-flight request; `finish` logs it
pub struct RequestTimer {
    adapter: RequestTimingAdapter,
    method: Method,
    path: String,
    started: Instant,
}

impl RequestTimer {
    /// Elapsed time so far, in fractional milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn finish<R>(self, response: &Response<R>) -> Result<RequestCompletion> {
        let completion = RequestCompletion {
            elapsed_ms: self.elapsed_ms(),
            method: self.method,
            path: self.path,
            status: response.status(),
        };
        self.adapter.on_complete(&completion)?;
        Ok(completion)
    }
}

fn request_target<B>(request: &Request<B>) -> String {
    request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
