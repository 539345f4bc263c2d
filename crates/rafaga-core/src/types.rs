// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message and telemetry types shared across the Rafaga workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a message, assigned at creation and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The author of a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Model,
    System,
}

/// An inline image attachment: MIME type plus base64-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// MIME type (e.g., "image/jpeg", "image/png").
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// Latency telemetry for one model turn.
///
/// Created partially populated when the first token arrives (only `ttft_ms`
/// is meaningful at that point) and finalized on completion. A `ttft_ms` of
/// 0.0 in a completion record means the stream produced no text fragments --
/// degraded data, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// Milliseconds from request start to the first received text fragment.
    pub ttft_ms: f64,

    /// Milliseconds from request start to stream termination. Recorded only
    /// on the success path.
    pub total_time_ms: f64,

    /// Derived throughput: `output_tokens / (total_time_ms / 1000)`.
    /// Present only when the provider reported a non-zero output count.
    pub tokens_per_second: Option<f64>,

    /// Provider-reported prompt token count, when available.
    pub input_tokens: Option<u32>,

    /// Provider-reported generated token count, when available.
    pub output_tokens: Option<u32>,
}

impl LatencyMetrics {
    /// Applies a newer metrics record over this one.
    ///
    /// Scalar fields are overwritten; `Option` fields are overwritten only
    /// when the newer record carries a value, so merging records with
    /// distinct populated fields is order-safe.
    pub fn merge(&mut self, newer: LatencyMetrics) {
        self.ttft_ms = newer.ttft_ms;
        self.total_time_ms = newer.total_time_ms;
        if newer.tokens_per_second.is_some() {
            self.tokens_per_second = newer.tokens_per_second;
        }
        if newer.input_tokens.is_some() {
            self.input_tokens = newer.input_tokens;
        }
        if newer.output_tokens.is_some() {
            self.output_tokens = newer.output_tokens;
        }
    }
}

/// A single conversation message.
///
/// Model-turn messages begin life as streaming placeholders (empty content,
/// `is_streaming = true`, no metrics) and are mutated in place by id as
/// stream events arrive, reaching a terminal state on completion or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Accumulated text. Grows monotonically via append while streaming.
    pub content: String,
    /// Optional attached image, set once at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
    pub timestamp: DateTime<Utc>,
    /// Absent until the first token arrives; finalized on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<LatencyMetrics>,
    /// True from placeholder creation until a terminal event is folded in.
    pub is_streaming: bool,
    /// Set only when the stream terminated with an error.
    pub error: bool,
}

impl Message {
    /// Creates a user message with optional image attachment.
    pub fn user(content: impl Into<String>, image: Option<ImageData>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content: content.into(),
            image,
            timestamp: Utc::now(),
            metrics: None,
            is_streaming: false,
            error: false,
        }
    }

    /// Creates an empty model placeholder marked as streaming.
    pub fn placeholder() -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Model,
            content: String::new(),
            image: None,
            timestamp: Utc::now(),
            metrics: None,
            is_streaming: true,
            error: false,
        }
    }

    /// Creates a completed model message (e.g., a welcome notice).
    pub fn notice(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Model,
            content: content.into(),
            image: None,
            timestamp: Utc::now(),
            metrics: None,
            is_streaming: false,
            error: false,
        }
    }
}
