// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Absence-tolerant host context.
//!
//! The host runtime may expose an ambient configuration object, or it may not
//! exist at all (headless and server-rendered contexts). Components receive a
//! `HostContext` explicitly at construction instead of reaching for a global;
//! every read degrades to `None`/`false` when the host or its config is
//! absent, never failing.

use std::sync::Arc;

/// Host-provided configuration lookup.
///
/// Implemented by the embedding host; the SDK only ever reads through it.
pub trait HostConfig: Send + Sync {
    /// Returns the value for `key`, or `None` when the key is undefined.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns true when `key` is defined.
    fn has(&self, key: &str) -> bool;
}

/// Handle to the (possibly absent) host runtime.
///
/// Cheap to clone; share one per host session.
#[derive(Clone)]
pub struct HostContext {
    config: Option<Arc<dyn HostConfig>>,
}

impl HostContext {
    /// A context with no host runtime behind it. All reads return absent.
    pub fn detached() -> Self {
        Self { config: None }
    }

    /// A context backed by a host configuration object.
    pub fn with_config(config: Arc<dyn HostConfig>) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Look up a configuration value, tolerating an absent host.
    pub fn config_value(&self, key: &str) -> Option<String> {
        self.config.as_ref()?.get(key)
    }

    /// Check whether a configuration key is defined, tolerating an absent host.
    pub fn has_config_value(&self, key: &str) -> bool {
        self.config.as_ref().is_some_and(|c| c.has(key))
    }

    /// Returns true when a host configuration object is attached.
    pub fn is_attached(&self) -> bool {
        self.config.is_some()
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::detached()
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("attached", &self.config.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<String, String>);

    impl HostConfig for MapConfig {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn has(&self, key: &str) -> bool {
            self.0.contains_key(key)
        }
    }

    fn attached() -> HostContext {
        let mut map = HashMap::new();
        map.insert("API_KEY".to_string(), "key-123".to_string());
        map.insert("API_URL".to_string(), "https://api.example.com".to_string());
        HostContext::with_config(Arc::new(MapConfig(map)))
    }

    #[test]
    fn detached_context_returns_absent() {
        let ctx = HostContext::detached();
        assert_eq!(ctx.config_value("API_KEY"), None);
        assert!(!ctx.has_config_value("API_KEY"));
        assert!(!ctx.is_attached());
    }

    #[test]
    fn attached_context_delegates_to_host_config() {
        let ctx = attached();
        assert_eq!(ctx.config_value("API_KEY").as_deref(), Some("key-123"));
        assert!(ctx.has_config_value("API_URL"));
    }

    #[test]
    fn missing_keys_are_absent_not_errors() {
        let ctx = attached();
        assert_eq!(ctx.config_value("NON_EXISTENT"), None);
        assert!(!ctx.has_config_value("NON_EXISTENT"));
    }

    #[test]
    fn check_before_get_pattern() {
        let ctx = attached();
        if ctx.has_config_value("API_KEY") {
            assert_eq!(ctx.config_value("API_KEY").as_deref(), Some("key-123"));
        } else {
            panic!("key should be present");
        }
    }

    #[test]
    fn default_is_detached() {
        assert!(!HostContext::default().is_attached());
    }
}
