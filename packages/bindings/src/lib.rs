use napi::Result as NapiResult;
use napi_derive::napi;
use std::sync::Mutex;

use estate_finance_core::guard::{sanitize_text, RateDecision, RateLimiter};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::loan::emi::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = estate_finance_core::loan::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_property_emi(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::loan::property_emi::PropertyEmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = estate_finance_core::loan::property_emi::calculate_property_emi(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::loan::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = estate_finance_core::loan::amortization::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_eligibility(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::loan::eligibility::EligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = estate_finance_core::loan::eligibility::calculate_eligibility(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn predict_price(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::pricing::estimate::PricePredictionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = estate_finance_core::pricing::estimate::predict_price(&input.sanitized())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Price estimate with seeded market variation. Negative seeds are rejected.
#[napi]
pub fn predict_price_with_jitter(input_json: String, seed: i64) -> NapiResult<String> {
    let input: estate_finance_core::pricing::estimate::PricePredictionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let seed = u64::try_from(seed)
        .map_err(|_| to_napi_error(format!("seed must be non-negative, got {seed}")))?;
    let output =
        estate_finance_core::pricing::estimate::predict_price_with_jitter(&input.sanitized(), seed)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_insights(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::pricing::insights::InsightsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        estate_finance_core::pricing::insights::build_insights(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_trend(input_json: String) -> NapiResult<String> {
    let input: estate_finance_core::pricing::trends::TrendInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        estate_finance_core::pricing::trends::analyze_trend(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Request guard
// ---------------------------------------------------------------------------

/// Per-route request limiter owned by the JS caller.
#[napi]
pub struct RequestLimiter {
    inner: Mutex<RateLimiter>,
}

#[napi]
impl RequestLimiter {
    #[napi(constructor)]
    pub fn new(max_requests: u32, window_seconds: u32) -> NapiResult<Self> {
        let inner = RateLimiter::new(
            max_requests,
            std::time::Duration::from_secs(u64::from(window_seconds)),
        )
        .map_err(to_napi_error)?;
        Ok(RequestLimiter {
            inner: Mutex::new(inner),
        })
    }

    /// Milliseconds until `client` may retry, or 0 when the request is allowed.
    #[napi]
    pub fn check(&self, client: String) -> NapiResult<u32> {
        let mut limiter = self.inner.lock().map_err(to_napi_error)?;
        Ok(match limiter.check(&client) {
            RateDecision::Allowed { .. } => 0,
            RateDecision::Limited { retry_after } => {
                u32::try_from(retry_after.as_millis()).unwrap_or(u32::MAX).max(1)
            }
        })
    }

    #[napi]
    pub fn purge(&self) -> NapiResult<()> {
        self.inner.lock().map_err(to_napi_error)?.purge();
        Ok(())
    }
}

#[napi]
pub fn sanitize(text: String) -> String {
    sanitize_text(&text).into_owned()
}
