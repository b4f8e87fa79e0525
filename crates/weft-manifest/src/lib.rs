// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest layer for the Weft host SDK.
//!
//! Manifest record types with required-field validation at the boundary, and
//! a versioned cache that decouples manifest acquisition from consumption.

pub mod cache;
pub mod manifest;

pub use cache::{CachedManifest, ManifestCache, ManifestSource};
pub use manifest::{
    criteria_matches, parse_manifest, validate_manifest, InteractionContext, InteractionEntry,
    MatchCriteria, PluginEntry, PluginManifest,
};
