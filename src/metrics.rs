use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

// Degraded generations (provider answered with nothing usable) and provider
// unavailability are separate series.
lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("assist_requests_total", "Total number of relay requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "assist_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref GENERATION_EMPTY_TOTAL: Counter = register_counter!(
        "assist_generation_empty_total",
        "Generation calls that produced no extractable text"
    )
    .unwrap();
    pub static ref GENERATION_UNAVAILABLE_TOTAL: Counter = register_counter!(
        "assist_generation_unavailable_total",
        "Generation calls that failed in transport or parsing"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "assist_request_latency_seconds",
        "Relay request latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_KEYS: Gauge = register_gauge!(
        "assist_rate_limit_keys",
        "Client keys currently tracked by the rate limiter"
    )
    .unwrap();
}
