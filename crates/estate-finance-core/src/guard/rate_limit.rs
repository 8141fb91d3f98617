use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::EstateFinanceError;
use crate::EstateFinanceResult;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Sliding-window request counter keyed by client.
///
/// Holds no global state; share one across threads behind a `Mutex`.
#[derive(Debug)]
pub struct RateLimiter<C: Clock = SystemClock> {
    max_requests: u32,
    window: Duration,
    clock: C,
    hits: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter<SystemClock> {
    pub fn new(max_requests: u32, window: Duration) -> EstateFinanceResult<Self> {
        Self::with_clock(max_requests, window, SystemClock)
    }

    /// 30 requests a minute, the limit on price predictions.
    pub fn for_predictions() -> Self {
        Self::preset(30)
    }

    /// 20 requests a minute, the limit on trend lookups.
    pub fn for_trends() -> Self {
        Self::preset(20)
    }

    /// 20 requests a minute, the limit on property EMI quotes.
    pub fn for_property_emi() -> Self {
        Self::preset(20)
    }

    fn preset(max_requests: u32) -> Self {
        RateLimiter {
            max_requests,
            window: Duration::from_secs(60),
            clock: SystemClock,
            hits: HashMap::new(),
        }
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(max_requests: u32, window: Duration, clock: C) -> EstateFinanceResult<Self> {
        if max_requests == 0 {
            return Err(EstateFinanceError::invalid(
                "max_requests",
                "Rate limit must allow at least one request",
            ));
        }
        if window.is_zero() {
            return Err(EstateFinanceError::invalid(
                "window",
                "Rate limit window must be non-zero",
            ));
        }
        Ok(RateLimiter {
            max_requests,
            window,
            clock,
            hits: HashMap::new(),
        })
    }

    /// Record a request from `key` if it fits in the current window.
    pub fn check(&mut self, key: &str) -> RateDecision {
        let now = self.clock.now();
        let window = self.window;
        let hits = self.hits.entry(key.to_string()).or_default();

        while hits
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= window)
        {
            hits.pop_front();
        }

        if hits.len() as u32 >= self.max_requests {
            let oldest = hits.front().copied().unwrap_or(now);
            let retry_after = window.saturating_sub(now.saturating_duration_since(oldest));
            warn!(key, retry_after_ms = retry_after.as_millis() as u64, "rate limited");
            return RateDecision::Limited { retry_after };
        }

        hits.push_back(now);
        let remaining = self.max_requests - hits.len() as u32;
        debug!(key, remaining, "request allowed");
        RateDecision::Allowed { remaining }
    }

    /// Drop clients with no requests inside the window.
    pub fn purge(&mut self) {
        let now = self.clock.now();
        let window = self.window;
        self.hits.retain(|_, hits| {
            hits.back()
                .is_some_and(|t| now.saturating_duration_since(*t) < window)
        });
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}
