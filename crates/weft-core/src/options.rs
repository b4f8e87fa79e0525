// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SDK option model.
//!
//! `WeftOptions` is deserializable so hosts can embed it in their own config
//! loading. Unknown keys are rejected to keep typos from silently defaulting.

use serde::{Deserialize, Serialize};

/// Options governing SDK-wide behavior, fixed at session start.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeftOptions {
    /// Maximum number of retained flag usage-log entries. `None` keeps the
    /// log unbounded; with a capacity set, the oldest entries are evicted.
    #[serde(default)]
    pub usage_log_capacity: Option<usize>,

    /// Reject manifests whose semver version regresses below the last
    /// accepted one. Off by default (last-write-wins).
    #[serde(default)]
    pub strict_manifest_versioning: bool,

    /// Emit debug-level traces for every dispatch and flag evaluation.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for WeftOptions {
    fn default() -> Self {
        Self {
            usage_log_capacity: None,
            strict_manifest_versioning: false,
            debug_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let opts = WeftOptions::default();
        assert!(opts.usage_log_capacity.is_none());
        assert!(!opts.strict_manifest_versioning);
        assert!(!opts.debug_logging);
    }

    #[test]
    fn deserializes_from_partial_json() {
        let opts: WeftOptions =
            serde_json::from_str(r#"{"strict_manifest_versioning": true}"#).unwrap();
        assert!(opts.strict_manifest_versioning);
        assert!(opts.usage_log_capacity.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<WeftOptions>(r#"{"usage_log_cap": 10}"#);
        assert!(result.is_err());
    }
}
