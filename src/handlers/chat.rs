use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::generate::GenerationResult;
use crate::metrics::{
    GENERATION_EMPTY_TOTAL, GENERATION_UNAVAILABLE_TOTAL, RATE_LIMITED_TOTAL, REQUEST_LATENCY,
    REQUEST_TOTAL,
};
use crate::models::{ChatReply, ChatRequest};
use crate::prompt::{self, Prompt};
use crate::rate_limit::Admission;
use crate::state::AppState;

// Fallback replies when the provider produced nothing usable; both paths
// return them with status 200, never a 500.
const CHAT_FALLBACK: &str = "No response";
const SUMMARY_FALLBACK: &str = "Summary unavailable";

lazy_static! {
    // substring match, not whole-word: a message that merely mentions
    // "summary" also routes to the summarize path; deployed behavior, kept
    static ref SUMMARY_INTENT: Regex =
        Regex::new(r"(?i)summarize|summary|patient memory").unwrap();
}

// First forwarded address, then real address, else one shared bucket for
// clients with no identifying header at all.
fn client_key(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}

// One pass through the relay: admit, validate, classify, compose, generate,
// shape. Holds no conversation state; transcript and memory travel in the
// request body.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    REQUEST_TOTAL.inc();

    let key = client_key(&headers);
    if state.limiter.admit(key) == Admission::Rejected {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = key, "rate limit exceeded");
        return Err(ApiError::TooManyRequests);
    }

    let Json(payload) = payload.map_err(|_| ApiError::InvalidRequest)?;

    let message = payload
        .message
        .as_ref()
        .and_then(|value| value.as_str())
        .ok_or(ApiError::InvalidMessage)?
        .trim();
    if message.is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let start_time = Instant::now();

    let reply = if SUMMARY_INTENT.is_match(message) {
        tracing::info!(
            client = key,
            intent = "summarize",
            transcript_len = payload.messages.len(),
            "relaying generation request"
        );
        let prompt = prompt::summary_prompt(&payload.messages);
        let result = run_generation(&state, key, &prompt).await?;
        ChatReply {
            reply: result.into_text_or(SUMMARY_FALLBACK),
            is_summary: Some(true),
        }
    } else {
        tracing::info!(
            client = key,
            intent = "chat",
            has_memory = !payload.summary.is_empty(),
            "relaying generation request"
        );
        let prompt = prompt::chat_prompt(message, &payload.summary);
        let result = run_generation(&state, key, &prompt).await?;
        ChatReply {
            reply: result.into_text_or(CHAT_FALLBACK),
            is_summary: None,
        }
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(reply))
}

// The single outbound call of a request. An empty result stays Ok and only
// bumps the degraded counter; an unavailable provider becomes the opaque
// 500 with detail kept to the log line.
async fn run_generation(
    state: &AppState,
    key: &str,
    prompt: &Prompt,
) -> Result<GenerationResult, ApiError> {
    match state.generator.generate(prompt).await {
        Ok(GenerationResult::Empty) => {
            GENERATION_EMPTY_TOTAL.inc();
            tracing::debug!(client = key, "generation produced no text");
            Ok(GenerationResult::Empty)
        }
        Ok(result) => Ok(result),
        Err(err) => {
            GENERATION_UNAVAILABLE_TOTAL.inc();
            tracing::error!(client = key, error = %err, "generation call failed");
            Err(ApiError::from(err))
        }
    }
}
