// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One streaming request/response cycle with latency instrumentation.
//!
//! [`stream_response`] opens a generation request, converts the incremental
//! response into the [`StreamObserver`] callback sequence, and computes
//! TTFT/throughput telemetry. All failures -- including cancellation -- are
//! funneled into `on_error`; the function never returns an error past its
//! own boundary.

use std::time::Instant;

use futures::StreamExt;
use rafaga_core::{ImageData, LatencyMetrics, RafagaError, StreamObserver};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Temperature used when the caller does not supply one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Nucleus sampling parameter sent with every request.
const TOP_P: f32 = 0.9;

/// Recognized per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Persona/behavior override. Steers responses, does not affect telemetry.
    pub system_instruction: Option<String>,
    /// Attached image; placed ahead of the text part in the request.
    pub image: Option<ImageData>,
    /// Generation randomness. Defaults to [`DEFAULT_TEMPERATURE`].
    pub temperature: Option<f32>,
}

/// Performs one streaming generation, delivering lifecycle events to `observer`.
///
/// Guarantees, per invocation:
/// - `on_first_token` fires at most once, before the first `on_chunk`, with
///   the elapsed milliseconds to the first non-empty text fragment.
/// - `on_chunk` fires once per non-empty text fragment, in arrival order.
/// - Exactly one of `on_complete` / `on_error` fires, last.
///
/// Usage counters are cumulative and typically arrive on the final chunk;
/// earlier values are treated as provisional and overwritten. A stream that
/// ends without any text completes with `ttft_ms = 0.0` (degraded data, not
/// an error). Cancellation via `cancel` is honored at each fragment-receive
/// point and delivered as `on_error(RafagaError::Cancelled)`; fragments
/// already delivered stay with the caller.
pub async fn stream_response(
    client: &GeminiClient,
    prompt: &str,
    model: &str,
    options: RequestOptions,
    cancel: &CancellationToken,
    observer: &mut dyn StreamObserver,
) {
    let start = Instant::now();
    let request = build_request(prompt, &options);

    debug!(model, "opening streaming generation request");

    let mut stream = match client.stream_generate_content(model, &request).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(model, error = %e, "streaming request failed to open");
            observer.on_error(e);
            return;
        }
    };

    let mut ttft_ms: Option<f64> = None;
    let mut input_tokens: Option<u32> = None;
    let mut output_tokens: Option<u32> = None;

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(model, "stream cancelled by caller");
                observer.on_error(RafagaError::Cancelled);
                return;
            }
            item = stream.next() => item,
        };

        let Some(item) = next else { break };

        let chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!(model, error = %e, "stream terminated with error");
                observer.on_error(e);
                return;
            }
        };

        if let Some(usage) = &chunk.usage_metadata {
            if usage.prompt_token_count.is_some() {
                input_tokens = usage.prompt_token_count;
            }
            if usage.candidates_token_count.is_some() {
                output_tokens = usage.candidates_token_count;
            }
        }

        if let Some(text) = chunk.text() {
            if ttft_ms.is_none() {
                let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                ttft_ms = Some(elapsed);
                observer.on_first_token(elapsed);
            }
            observer.on_chunk(&text);
        }
    }

    let total_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    let tokens_per_second = match output_tokens {
        Some(count) if count > 0 => Some(f64::from(count) / (total_time_ms / 1000.0)),
        _ => None,
    };

    let metrics = LatencyMetrics {
        ttft_ms: ttft_ms.unwrap_or(0.0),
        total_time_ms,
        tokens_per_second,
        input_tokens,
        output_tokens,
    };

    info!(
        model,
        ttft_ms = metrics.ttft_ms,
        total_time_ms = metrics.total_time_ms,
        tokens_per_second = ?metrics.tokens_per_second,
        "generation complete"
    );

    observer.on_complete(metrics);
}

/// Assembles the outgoing request: optional image part ahead of the text
/// part, optional system instruction, and sampling config.
fn build_request(prompt: &str, options: &RequestOptions) -> GenerateContentRequest {
    let mut parts = Vec::new();
    if let Some(image) = &options.image {
        parts.push(Part::inline_image(image));
    }
    parts.push(Part::text(prompt));

    GenerateContentRequest {
        contents: vec![Content::user(parts)],
        system_instruction: options
            .system_instruction
            .as_deref()
            .map(Content::text),
        generation_config: Some(GenerationConfig {
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: TOP_P,
        }),
    }
}
