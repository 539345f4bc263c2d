// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An observer that records the callback sequence for assertions.

use rafaga_core::{LatencyMetrics, RafagaError, StreamObserver};

/// One recorded callback invocation.
#[derive(Debug, Clone)]
pub enum ObservedEvent {
    FirstToken(f64),
    Chunk(String),
    Complete(LatencyMetrics),
    Error(String),
}

/// A [`StreamObserver`] that records every callback in invocation order,
/// so tests can assert ordering, cardinality, and payloads.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Vec<ObservedEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in invocation order.
    pub fn events(&self) -> &[ObservedEvent] {
        &self.events
    }

    /// Concatenation of all chunk payloads in delivery order.
    pub fn collected_text(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                ObservedEvent::Chunk(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of terminal callbacks recorded. Must be exactly 1 after a
    /// stream finishes.
    pub fn terminal_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ObservedEvent::Complete(_) | ObservedEvent::Error(_)))
            .count()
    }

    /// The completion metrics, if `on_complete` fired.
    pub fn completion(&self) -> Option<&LatencyMetrics> {
        self.events.iter().find_map(|e| match e {
            ObservedEvent::Complete(metrics) => Some(metrics),
            _ => None,
        })
    }

    /// The error message, if `on_error` fired.
    pub fn error_message(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            ObservedEvent::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }

    /// True when either no first-token event was recorded, or it strictly
    /// precedes every chunk event.
    pub fn first_token_precedes_chunks(&self) -> bool {
        let first_token = self
            .events
            .iter()
            .position(|e| matches!(e, ObservedEvent::FirstToken(_)));
        let first_chunk = self
            .events
            .iter()
            .position(|e| matches!(e, ObservedEvent::Chunk(_)));
        match (first_token, first_chunk) {
            (Some(token_at), Some(chunk_at)) => token_at < chunk_at,
            (_, None) => true,
            (None, Some(_)) => false,
        }
    }
}

impl StreamObserver for RecordingObserver {
    fn on_first_token(&mut self, ttft_ms: f64) {
        self.events.push(ObservedEvent::FirstToken(ttft_ms));
    }

    fn on_chunk(&mut self, text: &str) {
        self.events.push(ObservedEvent::Chunk(text.to_string()));
    }

    fn on_complete(&mut self, metrics: LatencyMetrics) {
        self.events.push(ObservedEvent::Complete(metrics));
    }

    fn on_error(&mut self, error: RafagaError) {
        self.events.push(ObservedEvent::Error(error.to_string()));
    }
}
