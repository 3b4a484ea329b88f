//! HTTP integration

pub mod request_timing;

pub use request_timing::{RequestCompletion, RequestTimer, RequestTimingAdapter};
