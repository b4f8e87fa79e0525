// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature-flag layer for the Weft host SDK.
//!
//! Flag state gates which interaction handlers are eligible to run. The store
//! evaluates flags with strict precedence (session override, declared
//! default, fail-closed) and keeps a full audit trail of evaluations.

pub mod store;

pub use store::{EvaluationTier, FlagDefinition, FlagStore, UsageLogEntry};
