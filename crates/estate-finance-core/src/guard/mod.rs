//! Request guards for the web layer that fronts the calculators: a
//! sliding-window rate limiter with an injectable clock, and sanitization of
//! free-text fields.

pub mod rate_limit;
pub mod sanitize;

pub use rate_limit::{Clock, ManualClock, RateDecision, RateLimiter, SystemClock};
pub use sanitize::sanitize_text;
