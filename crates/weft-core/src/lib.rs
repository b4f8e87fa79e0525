// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Weft host SDK.
//!
//! Provides the error taxonomy, the absence-tolerant host context, and the
//! SDK option model shared by every other crate in the workspace.

pub mod error;
pub mod host;
pub mod options;

// Re-export key items at crate root for ergonomic imports.
pub use error::WeftError;
pub use host::{HostConfig, HostContext};
pub use options::WeftOptions;
