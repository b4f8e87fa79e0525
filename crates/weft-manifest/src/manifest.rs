// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest records and boundary validation.
//!
//! The host hands manifests over as already-parsed structured data. Records
//! are validated here, at the cache boundary, so malformed fields never reach
//! resolution logic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weft_core::WeftError;

/// Structural predicate matched against a dispatch context.
///
/// A criteria map is satisfied when every pair equals the context's value for
/// that key. `BTreeMap` keeps iteration deterministic for reproducible
/// resolution.
pub type MatchCriteria = BTreeMap<String, serde_json::Value>;

/// Context supplied with an interaction request, tested against
/// [`MatchCriteria`].
pub type InteractionContext = BTreeMap<String, serde_json::Value>;

/// One handler registration a plugin declares for an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEntry {
    /// The abstract interaction this entry responds to (exact match).
    pub interaction_id: String,
    /// Structural predicate a dispatch context must satisfy.
    #[serde(default)]
    pub match_criteria: MatchCriteria,
    /// Name of the concrete handler to invoke.
    pub handler_ref: String,
    /// Total order key; lower runs first. Declaration order breaks ties.
    #[serde(default)]
    pub priority: i64,
    /// Flags that must all evaluate enabled for this entry to run.
    #[serde(default)]
    pub required_flags: Vec<String>,
}

/// One plugin's contribution to the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Unique plugin identifier within the manifest.
    pub id: String,
    /// Interaction handlers this plugin declares, in declaration order.
    #[serde(default)]
    pub interactions: Vec<InteractionEntry>,
}

/// Versioned, immutable-once-published description of available plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Manifest version string (semver when strict ordering is enforced).
    pub version: String,
    /// Plugin entries in declaration order.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// Parse a manifest from raw JSON and validate it.
///
/// The boundary entry point for hosts that receive manifests as untyped
/// JSON documents.
pub fn parse_manifest(value: serde_json::Value) -> Result<PluginManifest, WeftError> {
    let manifest: PluginManifest = serde_json::from_value(value)
        .map_err(|e| WeftError::manifest("manifest", e.to_string()))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validate required-field invariants on an already-typed manifest.
///
/// Checks: non-empty `version`; non-empty, manifest-unique plugin ids;
/// non-empty `interaction_id` and `handler_ref` on every entry.
pub fn validate_manifest(manifest: &PluginManifest) -> Result<(), WeftError> {
    if manifest.version.is_empty() {
        return Err(WeftError::manifest("manifest", "version must not be empty"));
    }

    let mut seen_ids = std::collections::HashSet::new();
    for (p, plugin) in manifest.plugins.iter().enumerate() {
        let path = format!("plugins[{p}]");
        if plugin.id.is_empty() {
            return Err(WeftError::manifest(path, "plugin id must not be empty"));
        }
        if !seen_ids.insert(plugin.id.as_str()) {
            return Err(WeftError::manifest(
                path,
                format!("duplicate plugin id '{}'", plugin.id),
            ));
        }
        for (i, entry) in plugin.interactions.iter().enumerate() {
            let path = format!("plugins[{p}].interactions[{i}]");
            if entry.interaction_id.is_empty() {
                return Err(WeftError::manifest(path, "interaction_id must not be empty"));
            }
            if entry.handler_ref.is_empty() {
                return Err(WeftError::manifest(path, "handler_ref must not be empty"));
            }
        }
    }
    Ok(())
}

/// Returns true when `context` satisfies `criteria`.
///
/// Every criteria pair must equal the context's value for that key; an empty
/// criteria map matches any context.
pub fn criteria_matches(criteria: &MatchCriteria, context: &InteractionContext) -> bool {
    criteria
        .iter()
        .all(|(key, expected)| context.get(key) == Some(expected))
}
