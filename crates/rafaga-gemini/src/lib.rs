// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming Gemini client for the Rafaga chat demo.
//!
//! Wraps the `streamGenerateContent?alt=sse` endpoint: [`GeminiClient`]
//! issues the HTTP request and parses the SSE chunk stream;
//! [`stream_response`] drives one full generation, delivering the
//! first-token / chunk / terminal callback sequence with latency telemetry
//! attached. One request attempt per submission -- retry is out of scope.

pub mod client;
pub mod sse;
pub mod streaming;
pub mod types;

pub use client::GeminiClient;
pub use streaming::{stream_response, RequestOptions, DEFAULT_TEMPERATURE};
