// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four-hook callback contract between the streaming client and its caller.

use crate::error::RafagaError;
use crate::types::LatencyMetrics;

/// Receives lifecycle events for one streaming generation.
///
/// Delivery guarantees (upheld by the streaming client):
/// - `on_first_token` fires at most once, and always before the first `on_chunk`.
/// - `on_chunk` fires zero or more times, in fragment arrival order.
/// - Exactly one of `on_complete` / `on_error` fires, and it is the last call.
///
/// Calls for a single stream are strictly sequential, never concurrent.
pub trait StreamObserver: Send {
    /// First non-empty text fragment received; `ttft_ms` is the elapsed
    /// milliseconds since the request started.
    fn on_first_token(&mut self, ttft_ms: f64);

    /// A raw text fragment, delivered in arrival order.
    fn on_chunk(&mut self, text: &str);

    /// Stream exhausted normally; `metrics` is the full telemetry record.
    fn on_complete(&mut self, metrics: LatencyMetrics);

    /// Stream failed or was cancelled. No `on_complete` follows.
    fn on_error(&mut self, error: RafagaError);
}
