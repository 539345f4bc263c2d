// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one full conversation turn: submission, streaming, settlement.

use std::sync::{Arc, Mutex};

use rafaga_core::{ImageData, MessageId, RafagaError};
use rafaga_gemini::{stream_response, GeminiClient, RequestOptions};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::conversation::Conversation;
use crate::sink::ConversationSink;

/// Everything one turn needs besides the conversation itself.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest<'a> {
    /// The user's text, possibly empty when an image is attached.
    pub text: &'a str,
    /// Optional image attachment.
    pub image: Option<ImageData>,
    /// Model identifier to stream from.
    pub model: &'a str,
    /// Persona/system instruction, if configured.
    pub system_instruction: Option<String>,
    /// Sampling temperature override.
    pub temperature: Option<f32>,
}

/// Runs one turn end to end.
///
/// Validates and appends the user message and placeholder, then streams the
/// response into the placeholder. Returns the placeholder id once the turn
/// has settled (completed, failed, or been cancelled). An `Err` means the
/// submission was rejected and the conversation was not modified.
#[instrument(skip_all, fields(model = turn.model))]
pub async fn run_turn(
    conversation: &Arc<Mutex<Conversation>>,
    client: &GeminiClient,
    turn: TurnRequest<'_>,
    cancel: &CancellationToken,
) -> Result<MessageId, RafagaError> {
    let submission = {
        let mut guard = conversation
            .lock()
            .map_err(|_| RafagaError::Internal("conversation lock poisoned".to_string()))?;
        guard.submit(turn.text, turn.image.clone())?
    };

    let options = RequestOptions {
        system_instruction: turn.system_instruction,
        image: turn.image,
        temperature: turn.temperature,
    };

    let mut sink = ConversationSink::new(
        Arc::clone(conversation),
        submission.placeholder_id.clone(),
    );
    stream_response(
        client,
        &submission.prompt,
        turn.model,
        options,
        cancel,
        &mut sink,
    )
    .await;

    Ok(submission.placeholder_id)
}
