// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory conversation state, mutated by identity-keyed fold operations.
//!
//! Messages live in a map keyed by id with a separately maintained display
//! order, so stream events update the right message without scanning the
//! sequence. At most one message streams at a time: submissions are
//! rejected while a placeholder is in flight.

use std::collections::HashMap;

use rafaga_config::model::ChatConfig;
use rafaga_core::{ImageData, LatencyMetrics, Message, MessageId, RafagaError};
use tracing::{debug, warn};

/// Default cap on decoded image size, matching the UI-side bound.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Prompt substituted when a submission carries an image but no text.
pub const DEFAULT_IMAGE_PROMPT: &str = "Describe esta imagen";

/// The messages appended by one accepted submission, plus the effective
/// prompt to send to the provider.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Id of the appended user message.
    pub user_id: MessageId,
    /// Id of the appended streaming placeholder.
    pub placeholder_id: MessageId,
    /// Prompt text for the request: the user's text, or the configured
    /// fallback when only an image was sent.
    pub prompt: String,
}

/// Owns the ordered message sequence for one chat session.
pub struct Conversation {
    messages: HashMap<MessageId, Message>,
    order: Vec<MessageId>,
    /// Id of the in-flight streaming placeholder, if any.
    active: Option<MessageId>,
    max_image_bytes: usize,
    image_prompt: String,
}

impl Conversation {
    /// Creates an empty conversation with default limits.
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
            order: Vec::new(),
            active: None,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            image_prompt: DEFAULT_IMAGE_PROMPT.to_string(),
        }
    }

    /// Creates an empty conversation with limits taken from configuration.
    pub fn from_config(chat: &ChatConfig) -> Self {
        Self {
            max_image_bytes: chat.max_image_bytes,
            image_prompt: chat.image_prompt.clone(),
            ..Self::new()
        }
    }

    /// Appends a completed model-role message (e.g., a welcome notice).
    pub fn push_notice(&mut self, text: impl Into<String>) -> MessageId {
        self.push(Message::notice(text))
    }

    /// Validates and accepts one user submission.
    ///
    /// Appends the user message and then the streaming placeholder, in that
    /// order. Rejected (appending nothing) when a stream is already in
    /// flight, when neither text nor image is provided, or when the image
    /// exceeds the configured size bound.
    pub fn submit(
        &mut self,
        text: &str,
        image: Option<ImageData>,
    ) -> Result<Submission, RafagaError> {
        if self.active.is_some() {
            return Err(RafagaError::Busy);
        }
        if text.trim().is_empty() && image.is_none() {
            return Err(RafagaError::InvalidInput(
                "a prompt or an image is required".to_string(),
            ));
        }
        if let Some(image) = &image {
            let decoded_len = base64::decoded_len_estimate(image.data.len());
            if decoded_len > self.max_image_bytes {
                return Err(RafagaError::InvalidInput(format!(
                    "image is too large: ~{decoded_len} bytes exceeds the {} byte limit",
                    self.max_image_bytes
                )));
            }
        }

        let prompt = if text.trim().is_empty() {
            self.image_prompt.clone()
        } else {
            text.to_string()
        };

        let user_id = self.push(Message::user(text, image));
        let placeholder_id = self.push(Message::placeholder());
        self.active = Some(placeholder_id.clone());

        debug!(user_id = %user_id, placeholder_id = %placeholder_id, "submission accepted");

        Ok(Submission {
            user_id,
            placeholder_id,
            prompt,
        })
    }

    /// Folds a first-token event: sets `metrics.ttft_ms`, preserving any
    /// fields already present.
    pub fn apply_first_token(&mut self, id: &MessageId, ttft_ms: f64) {
        let Some(message) = self.messages.get_mut(id) else {
            warn!(id = %id, "first-token event for unknown message");
            return;
        };
        message
            .metrics
            .get_or_insert_with(LatencyMetrics::default)
            .ttft_ms = ttft_ms;
    }

    /// Folds a chunk event: appends the fragment to the message content.
    pub fn apply_chunk(&mut self, id: &MessageId, text: &str) {
        let Some(message) = self.messages.get_mut(id) else {
            warn!(id = %id, "chunk event for unknown message");
            return;
        };
        message.content.push_str(text);
    }

    /// Folds a completion: merges the final metrics (new fields win) and
    /// clears the streaming flag.
    pub fn apply_complete(&mut self, id: &MessageId, metrics: LatencyMetrics) {
        let Some(message) = self.messages.get_mut(id) else {
            warn!(id = %id, "completion event for unknown message");
            return;
        };
        match &mut message.metrics {
            Some(existing) => existing.merge(metrics),
            None => message.metrics = Some(metrics),
        }
        message.is_streaming = false;
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    /// Folds an error: appends an inline error marker (keeping any partial
    /// content), clears the streaming flag, and marks the message failed.
    pub fn apply_error(&mut self, id: &MessageId, error: &RafagaError) {
        let Some(message) = self.messages.get_mut(id) else {
            warn!(id = %id, "error event for unknown message");
            return;
        };
        message.content.push_str(&format!("\n[Error: {error}]"));
        message.is_streaming = false;
        message.error = true;
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    /// True while a submission's stream is in flight.
    pub fn is_streaming(&self) -> bool {
        self.active.is_some()
    }

    /// Looks up a message by id.
    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.get(id)
    }

    /// Messages in display order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.order.iter().filter_map(|id| self.messages.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn push(&mut self, message: Message) -> MessageId {
        let id = message.id.clone();
        self.order.push(id.clone());
        self.messages.insert(id.clone(), message);
        id
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
