// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for Gemini `streamGenerateContent?alt=sse` responses.
//!
//! Converts a reqwest response byte stream into typed
//! [`GenerateContentChunk`] values using the `eventsource-stream` crate for
//! SSE protocol compliance. Unlike named-event SSE protocols, Gemini emits
//! anonymous `data:` events where each payload is one complete JSON chunk.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use rafaga_core::RafagaError;

use crate::types::GenerateContentChunk;

/// Parses a reqwest streaming response into a stream of [`GenerateContentChunk`]s.
///
/// Events with empty data (keep-alives) are skipped. A payload that fails to
/// deserialize, or a transport fault mid-stream, surfaces as a
/// [`RafagaError::Provider`] item.
pub fn parse_sse_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<GenerateContentChunk, RafagaError>> + Send>> {
    let event_stream = response.bytes_stream().eventsource();

    let mapped = event_stream.filter_map(|result| async move {
        match result {
            Ok(event) => {
                if event.data.trim().is_empty() {
                    return None;
                }
                Some(
                    serde_json::from_str::<GenerateContentChunk>(&event.data).map_err(|e| {
                        RafagaError::Provider {
                            message: format!("failed to parse stream chunk: {e}"),
                            source: Some(Box::new(e)),
                        }
                    }),
                )
            }
            Err(e) => Some(Err(RafagaError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });

    Box::pin(mapped)
}
