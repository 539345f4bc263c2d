// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state controller and turn driver.
//!
//! [`Conversation`] owns the ordered message sequence and folds stream
//! events into it by message identity; [`run_turn`] wires a submission
//! through the streaming client and back into the conversation via
//! [`ConversationSink`].

pub mod conversation;
pub mod sink;
pub mod turn;

pub use conversation::{Conversation, Submission, DEFAULT_IMAGE_PROMPT, DEFAULT_MAX_IMAGE_BYTES};
pub use sink::ConversationSink;
pub use turn::{run_turn, TurnRequest};
