use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod generate;
mod handlers;
mod metrics;
mod models;
mod prompt;
mod rate_limit;
mod state;

use config::Args;
use generate::GeminiClient;
use rate_limit::RateLimiter;
use state::AppState;

// this is main async function with tokio
#[tokio::main]
async fn main() {
    // parse cli arguments
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // required up front; without it every generation call would 500
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY must be set");
            std::process::exit(1);
        }
    };

    let generator = GeminiClient::new(
        args.gemini_url.clone(),
        args.model.clone(),
        api_key,
        Duration::from_secs(args.request_timeout),
    )
    .unwrap();

    // creating shared state
    let state = Arc::new(AppState {
        limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
        generator: Arc::new(generator),
    });

    // periodic sweep so the limiter map stays bounded by active clients
    let sweep_state = state.clone();
    let sweep_every = Duration::from_secs(args.evict_interval);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            let removed = sweep_state.limiter.evict_expired(Instant::now());
            metrics::RATE_LIMIT_KEYS.set(sweep_state.limiter.tracked_keys() as f64);
            if removed > 0 {
                tracing::debug!(removed, "evicted stale rate limit entries");
            }
        }
    });

    // creating the router with routes
    let app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/ai", post(handlers::chat_handler)) // relay endpoint
        .route("/metrics", get(handlers::metrics_handler)) // metrics endpoint
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Gateway running on http://localhost:{}", args.port);
    tracing::info!(
        "Forwarding to {} (model {})",
        args.gemini_url,
        args.model
    );
    tracing::info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit,
        args.rate_window
    );
    axum::serve(listener, app).await.unwrap();
}
