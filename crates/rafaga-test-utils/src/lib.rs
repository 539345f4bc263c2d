// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Rafaga integration tests.
//!
//! Provides [`RecordingObserver`] for asserting on the stream callback
//! sequence and [`SseBody`] for scripting Gemini SSE payloads into a
//! wiremock server, enabling fast, CI-runnable tests without external API
//! calls.

pub mod observer;
pub mod sse;

pub use observer::{ObservedEvent, RecordingObserver};
pub use sse::{mount_gemini_stream, SseBody};
