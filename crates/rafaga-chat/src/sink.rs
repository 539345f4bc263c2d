// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridges the stream callback sequence into conversation fold operations.

use std::sync::{Arc, Mutex};

use rafaga_core::{LatencyMetrics, RafagaError, StreamObserver};
use tracing::warn;

use crate::conversation::Conversation;
use rafaga_core::MessageId;

/// A [`StreamObserver`] that applies every stream event to one target
/// message inside a shared [`Conversation`].
pub struct ConversationSink {
    conversation: Arc<Mutex<Conversation>>,
    target: MessageId,
}

impl ConversationSink {
    pub fn new(conversation: Arc<Mutex<Conversation>>, target: MessageId) -> Self {
        Self {
            conversation,
            target,
        }
    }

    fn with_conversation(&self, apply: impl FnOnce(&mut Conversation)) {
        match self.conversation.lock() {
            Ok(mut conversation) => apply(&mut conversation),
            Err(poisoned) => {
                warn!(target = %self.target, "conversation lock poisoned, dropping event");
                drop(poisoned);
            }
        }
    }
}

impl StreamObserver for ConversationSink {
    fn on_first_token(&mut self, ttft_ms: f64) {
        let target = self.target.clone();
        self.with_conversation(|c| c.apply_first_token(&target, ttft_ms));
    }

    fn on_chunk(&mut self, text: &str) {
        let target = self.target.clone();
        self.with_conversation(|c| c.apply_chunk(&target, text));
    }

    fn on_complete(&mut self, metrics: LatencyMetrics) {
        let target = self.target.clone();
        self.with_conversation(|c| c.apply_complete(&target, metrics));
    }

    fn on_error(&mut self, error: RafagaError) {
        let target = self.target.clone();
        self.with_conversation(|c| c.apply_error(&target, &error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_routes_events_to_its_target_message() {
        let conversation = Arc::new(Mutex::new(Conversation::new()));
        let submission = conversation.lock().unwrap().submit("hola", None).unwrap();

        let mut sink = ConversationSink::new(
            Arc::clone(&conversation),
            submission.placeholder_id.clone(),
        );
        sink.on_first_token(50.0);
        sink.on_chunk("Hola");
        sink.on_chunk(" mundo");
        sink.on_complete(LatencyMetrics {
            ttft_ms: 50.0,
            total_time_ms: 200.0,
            tokens_per_second: Some(5.0),
            input_tokens: Some(2),
            output_tokens: Some(1),
        });

        let conversation = conversation.lock().unwrap();
        let message = conversation.get(&submission.placeholder_id).unwrap();
        assert_eq!(message.content, "Hola mundo");
        assert!(!message.is_streaming);
        assert_eq!(message.metrics.as_ref().unwrap().ttft_ms, 50.0);
    }

    #[test]
    fn sink_error_marks_the_target_failed() {
        let conversation = Arc::new(Mutex::new(Conversation::new()));
        let submission = conversation.lock().unwrap().submit("hola", None).unwrap();

        let mut sink = ConversationSink::new(
            Arc::clone(&conversation),
            submission.placeholder_id.clone(),
        );
        sink.on_chunk("parcial");
        sink.on_error(RafagaError::Cancelled);

        let conversation = conversation.lock().unwrap();
        let message = conversation.get(&submission.placeholder_id).unwrap();
        assert_eq!(message.content, "parcial\n[Error: generation cancelled]");
        assert!(message.error);
        assert!(!conversation.is_streaming());
    }
}
