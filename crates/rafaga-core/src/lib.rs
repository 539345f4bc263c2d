// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rafaga low-latency chat demo.
//!
//! This crate provides the shared message and telemetry types, the error
//! type, and the stream callback contract used throughout the Rafaga
//! workspace. The streaming client (`rafaga-gemini`) emits events through
//! [`StreamObserver`]; the conversation controller (`rafaga-chat`) folds
//! them into message state.

pub mod error;
pub mod observer;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RafagaError;
pub use observer::StreamObserver;
pub use types::{ImageData, LatencyMetrics, Message, MessageId, Role};
