// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature-flag store.
//!
//! Single source of truth for "is capability X enabled right now". Evaluation
//! precedence: session override, then the flag's declared default, then a
//! host-config fallback, then fail-closed. Every evaluation appends one
//! usage-log entry naming the tier that decided it.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;
use weft_core::{HostContext, WeftOptions};

/// A feature-flag definition as declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Unique flag identifier (e.g. "inline-editing").
    pub id: String,
    /// Whether the flag is enabled when no override is active.
    pub default_enabled: bool,
    /// Free-form metadata (owner, description, rollout notes).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Which precedence tier produced an evaluation result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EvaluationTier {
    /// An active session override decided the result.
    Override,
    /// The manifest-declared default (stored definition or host-config
    /// fallback) decided the result.
    Manifest,
    /// The flag was unknown everywhere; fail-closed `false`.
    Default,
}

/// One append-only audit record per flag evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLogEntry {
    pub flag_id: String,
    pub result: bool,
    pub timestamp: DateTime<Utc>,
    pub evaluated_by: EvaluationTier,
}

#[derive(Default)]
struct FlagStoreInner {
    /// Definition storage keyed by id.
    definitions: HashMap<String, FlagDefinition>,
    /// Registration order of definition ids; re-registration keeps position.
    order: Vec<String>,
    /// Session-scoped overrides; cleared as one unit.
    overrides: HashMap<String, bool>,
    /// Insertion-ordered usage log, oldest first.
    usage: VecDeque<UsageLogEntry>,
}

/// Session-scoped feature-flag store.
///
/// All operations take `&self`; state lives behind a single mutex so bulk
/// mutations (notably [`FlagStore::clear_flag_overrides`]) are all-or-nothing
/// with respect to any concurrent reader.
pub struct FlagStore {
    inner: Mutex<FlagStoreInner>,
    host: HostContext,
    usage_capacity: Option<usize>,
    debug_logging: bool,
}

impl FlagStore {
    /// Create a store bound to a host context and session options.
    pub fn new(host: HostContext, options: &WeftOptions) -> Self {
        Self {
            inner: Mutex::new(FlagStoreInner::default()),
            host,
            usage_capacity: options.usage_log_capacity,
            debug_logging: options.debug_logging,
        }
    }

    /// Register or replace one flag definition.
    ///
    /// Re-registering an existing id replaces the definition in place and
    /// keeps its original registration-order position.
    pub fn register_flag(&self, definition: FlagDefinition) {
        let mut inner = self.inner.lock().expect("flag store poisoned");
        if !inner.definitions.contains_key(&definition.id) {
            inner.order.push(definition.id.clone());
        }
        inner
            .definitions
            .insert(definition.id.clone(), definition);
    }

    /// Bulk-register definitions in iteration order.
    pub fn load_definitions(&self, definitions: impl IntoIterator<Item = FlagDefinition>) {
        for definition in definitions {
            self.register_flag(definition);
        }
    }

    /// Evaluate a flag. Total over all inputs; never fails.
    ///
    /// Precedence: (1) active session override, (2) stored definition's
    /// `default_enabled`, (3) host-config `flags.<id>` fallback, (4)
    /// fail-closed `false`. Appends exactly one usage-log entry.
    pub fn is_flag_enabled(&self, flag_id: &str) -> bool {
        let decided = {
            let inner = self.inner.lock().expect("flag store poisoned");
            if let Some(enabled) = inner.overrides.get(flag_id) {
                Some((*enabled, EvaluationTier::Override))
            } else if let Some(definition) = inner.definitions.get(flag_id) {
                Some((definition.default_enabled, EvaluationTier::Manifest))
            } else {
                None
            }
        };

        // The host callback runs outside the lock so a config object that
        // consults the store itself cannot re-enter the mutex.
        let (result, tier) = decided.unwrap_or_else(|| {
            match self.host.config_value(&format!("flags.{flag_id}")) {
                Some(raw) => (parse_flag_value(&raw), EvaluationTier::Manifest),
                // Unknown capabilities are never silently enabled.
                None => (false, EvaluationTier::Default),
            }
        });

        let mut inner = self.inner.lock().expect("flag store poisoned");
        inner.usage.push_back(UsageLogEntry {
            flag_id: flag_id.to_string(),
            result,
            timestamp: Utc::now(),
            evaluated_by: tier,
        });
        if let Some(cap) = self.usage_capacity {
            while inner.usage.len() > cap {
                inner.usage.pop_front();
            }
        }
        drop(inner);

        if self.debug_logging {
            debug!(flag_id, result, tier = %tier, "flag evaluated");
        }
        result
    }

    /// Stored metadata for a flag, or `None` for an unknown id.
    ///
    /// `None` is distinct from "disabled"; no usage-log entry is appended.
    pub fn flag_meta(&self, flag_id: &str) -> Option<FlagDefinition> {
        let inner = self.inner.lock().expect("flag store poisoned");
        inner.definitions.get(flag_id).cloned()
    }

    /// All definitions in registration order.
    pub fn all_flags(&self) -> Vec<FlagDefinition> {
        let inner = self.inner.lock().expect("flag store poisoned");
        inner
            .order
            .iter()
            .filter_map(|id| inner.definitions.get(id).cloned())
            .collect()
    }

    /// Insertion-order snapshot of the usage log. The returned vector does
    /// not observe later evaluations.
    pub fn usage_log(&self) -> Vec<UsageLogEntry> {
        let inner = self.inner.lock().expect("flag store poisoned");
        inner.usage.iter().cloned().collect()
    }

    /// Idempotent upsert of a session override.
    ///
    /// The flag does not need a stored definition; overrides may pre-stage a
    /// flag before its definition arrives.
    pub fn set_flag_override(&self, flag_id: &str, enabled: bool) {
        let mut inner = self.inner.lock().expect("flag store poisoned");
        inner.overrides.insert(flag_id.to_string(), enabled);
        drop(inner);
        if self.debug_logging {
            debug!(flag_id, enabled, "flag override set");
        }
    }

    /// Remove all session overrides as one atomic unit. Subsequent
    /// evaluations fall back to declared defaults.
    pub fn clear_flag_overrides(&self) {
        let mut inner = self.inner.lock().expect("flag store poisoned");
        let count = inner.overrides.len();
        inner.overrides.clear();
        drop(inner);
        if self.debug_logging {
            debug!(count, "flag overrides cleared");
        }
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("flag store poisoned");
        inner.order.len()
    }

    /// Returns true if no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FlagStore {
    fn default() -> Self {
        Self::new(HostContext::detached(), &WeftOptions::default())
    }
}

/// Interpret a host-config flag value. Accepts "true"/"1" as enabled.
fn parse_flag_value(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true") || raw == "1"
}
