use std::sync::Arc;

use crate::generate::Generator;
use crate::rate_limit::RateLimiter;

// app's shared state
pub struct AppState {
    pub limiter: RateLimiter,
    pub generator: Arc<dyn Generator>,
}
