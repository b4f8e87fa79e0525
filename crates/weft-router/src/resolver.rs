// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction resolution.
//!
//! Translates an abstract interaction request into a concrete, flag-filtered,
//! ordered handler chain. Resolution reads the cached manifest synchronously
//! and never blocks on I/O; chains are recomputed per call because flag state
//! can change between dispatches.

use std::sync::{Arc, Mutex};

use tracing::debug;
use weft_core::{WeftError, WeftOptions};
use weft_flags::FlagStore;
use weft_manifest::{criteria_matches, InteractionContext, ManifestCache, PluginManifest};

/// One resolved handler with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHandler {
    /// Plugin that declared the entry.
    pub plugin_id: String,
    /// Name of the concrete handler to invoke.
    pub handler_ref: String,
    /// Priority the entry was sorted under.
    pub priority: i64,
}

/// Ordered handler chain for one resolved interaction.
///
/// Owned by the call that produced it; never cached across dispatches.
pub type ResolvedHandlerChain = Vec<ResolvedHandler>;

/// Resolves interaction requests against the cached manifest and flag state.
pub struct InteractionResolver {
    cache: Arc<ManifestCache>,
    flags: Arc<FlagStore>,
    version_guard: VersionGuard,
    pub(crate) debug_logging: bool,
}

impl InteractionResolver {
    /// Create a resolver over the given cache and flag store.
    pub fn new(cache: Arc<ManifestCache>, flags: Arc<FlagStore>, options: &WeftOptions) -> Self {
        Self {
            cache,
            flags,
            version_guard: VersionGuard::new(options.strict_manifest_versioning),
            debug_logging: options.debug_logging,
        }
    }

    /// Resolve an interaction to an ordered handler chain.
    ///
    /// Entries are kept when their `interaction_id` matches exactly, their
    /// `match_criteria` is satisfied by `context`, and every required flag
    /// evaluates enabled. Survivors sort by `(priority asc, declaration
    /// order asc)`. An empty chain is a valid no-op outcome, returned when
    /// nothing matches, everything is flag-gated off, or no manifest is
    /// cached yet.
    pub fn resolve(
        &self,
        interaction_id: &str,
        context: &InteractionContext,
    ) -> ResolvedHandlerChain {
        let Some(manifest) = self.cache.cached_plugin_manifest() else {
            if self.debug_logging {
                debug!(interaction_id, "resolve with no cached manifest; empty chain");
            }
            return Vec::new();
        };

        // Declaration order across plugins then entries is the tie-break,
        // so survivors carry their global traversal index.
        let mut survivors: Vec<(i64, usize, ResolvedHandler)> = Vec::new();
        let mut declaration_index = 0usize;
        for plugin in &manifest.plugins {
            for entry in &plugin.interactions {
                let index = declaration_index;
                declaration_index += 1;

                if entry.interaction_id != interaction_id {
                    continue;
                }
                if !criteria_matches(&entry.match_criteria, context) {
                    continue;
                }
                if !entry
                    .required_flags
                    .iter()
                    .all(|flag| self.flags.is_flag_enabled(flag))
                {
                    continue;
                }

                survivors.push((
                    entry.priority,
                    index,
                    ResolvedHandler {
                        plugin_id: plugin.id.clone(),
                        handler_ref: entry.handler_ref.clone(),
                        priority: entry.priority,
                    },
                ));
            }
        }

        survivors.sort_by_key(|(priority, index, _)| (*priority, *index));
        let chain: ResolvedHandlerChain =
            survivors.into_iter().map(|(_, _, handler)| handler).collect();
        if self.debug_logging {
            debug!(interaction_id, chain_len = chain.len(), "interaction resolved");
        }
        chain
    }

    /// Enforce the version-monotonicity policy on an incoming manifest.
    ///
    /// The cache itself is last-write-wins; hosts that require strict
    /// ordering call this before (or after) pushing. In strict mode a
    /// manifest whose semver version is below the last accepted one is
    /// rejected; otherwise this always accepts.
    pub fn observe_manifest(&self, manifest: &PluginManifest) -> Result<(), WeftError> {
        self.version_guard.observe(&manifest.version)
    }

    /// The flag store consulted during resolution.
    pub fn flags(&self) -> &Arc<FlagStore> {
        &self.flags
    }

    /// The manifest cache consulted during resolution.
    pub fn cache(&self) -> &Arc<ManifestCache> {
        &self.cache
    }
}

/// Tracks the highest accepted manifest version for strict-mode rejection.
struct VersionGuard {
    strict: bool,
    last_accepted: Mutex<Option<semver::Version>>,
}

impl VersionGuard {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            last_accepted: Mutex::new(None),
        }
    }

    fn observe(&self, version: &str) -> Result<(), WeftError> {
        if !self.strict {
            return Ok(());
        }
        let incoming = semver::Version::parse(version).map_err(|e| {
            WeftError::manifest("manifest.version", format!("not a semver version: {e}"))
        })?;
        let mut last = self.last_accepted.lock().expect("version guard poisoned");
        if let Some(current) = last.as_ref() {
            if incoming < *current {
                return Err(WeftError::ManifestVersion {
                    current: current.to_string(),
                    incoming: incoming.to_string(),
                });
            }
        }
        *last = Some(incoming);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;
    use weft_core::HostContext;
    use weft_manifest::{InteractionEntry, MatchCriteria, ManifestSource, PluginEntry};

    struct NoSource;

    #[async_trait::async_trait]
    impl ManifestSource for NoSource {
        async fn fetch_manifest(&self) -> Result<PluginManifest, WeftError> {
            Err(WeftError::Internal("no source in tests".into()))
        }
    }

    fn entry(interaction_id: &str, handler_ref: &str, priority: i64) -> InteractionEntry {
        InteractionEntry {
            interaction_id: interaction_id.to_string(),
            match_criteria: MatchCriteria::new(),
            handler_ref: handler_ref.to_string(),
            priority,
            required_flags: vec![],
        }
    }

    fn setup(options: WeftOptions) -> (Arc<ManifestCache>, Arc<FlagStore>, InteractionResolver) {
        let cache = Arc::new(ManifestCache::new(Arc::new(NoSource)));
        let flags = Arc::new(FlagStore::new(HostContext::detached(), &options));
        let resolver = InteractionResolver::new(cache.clone(), flags.clone(), &options);
        (cache, flags, resolver)
    }

    fn push(cache: &ManifestCache, plugins: Vec<PluginEntry>) {
        cache
            .set_plugin_manifest(PluginManifest {
                version: "1.0.0".to_string(),
                plugins,
            })
            .unwrap();
    }

    #[test]
    fn empty_cache_resolves_to_empty_chain() {
        let (_, _, resolver) = setup(WeftOptions::default());
        assert!(resolver.resolve("click", &InteractionContext::new()).is_empty());
    }

    #[test]
    fn priority_then_declaration_order() {
        let (cache, _, resolver) = setup(WeftOptions::default());
        // Priorities [5, 1, 1] declared in that order must resolve to
        // declaration indexes [1, 2, 0].
        push(
            &cache,
            vec![PluginEntry {
                id: "p".to_string(),
                interactions: vec![
                    entry("click", "h0", 5),
                    entry("click", "h1", 1),
                    entry("click", "h2", 1),
                ],
            }],
        );

        let chain = resolver.resolve("click", &InteractionContext::new());
        let refs: Vec<&str> = chain.iter().map(|h| h.handler_ref.as_str()).collect();
        assert_eq!(refs, vec!["h1", "h2", "h0"]);
    }

    #[test]
    fn declaration_order_spans_plugins() {
        let (cache, _, resolver) = setup(WeftOptions::default());
        push(
            &cache,
            vec![
                PluginEntry {
                    id: "first".to_string(),
                    interactions: vec![entry("click", "a", 1)],
                },
                PluginEntry {
                    id: "second".to_string(),
                    interactions: vec![entry("click", "b", 1)],
                },
            ],
        );

        let chain = resolver.resolve("click", &InteractionContext::new());
        assert_eq!(chain[0].plugin_id, "first");
        assert_eq!(chain[1].plugin_id, "second");
    }

    #[test]
    fn exact_interaction_id_match_only() {
        let (cache, _, resolver) = setup(WeftOptions::default());
        push(
            &cache,
            vec![PluginEntry {
                id: "p".to_string(),
                interactions: vec![entry("button.click", "h", 0)],
            }],
        );

        assert_eq!(resolver.resolve("button.click", &InteractionContext::new()).len(), 1);
        assert!(resolver.resolve("button", &InteractionContext::new()).is_empty());
        assert!(resolver.resolve("button.click.extra", &InteractionContext::new()).is_empty());
    }

    #[test]
    fn criteria_filter_against_context() {
        let (cache, _, resolver) = setup(WeftOptions::default());
        let mut criteria = MatchCriteria::new();
        criteria.insert("component_type".to_string(), json!("button"));
        push(
            &cache,
            vec![PluginEntry {
                id: "p".to_string(),
                interactions: vec![InteractionEntry {
                    match_criteria: criteria,
                    ..entry("click", "h", 0)
                }],
            }],
        );

        let matching: InteractionContext =
            [("component_type".to_string(), json!("button"))].into();
        assert_eq!(resolver.resolve("click", &matching).len(), 1);

        let other: InteractionContext =
            [("component_type".to_string(), json!("input"))].into();
        assert!(resolver.resolve("click", &other).is_empty());
    }

    #[test]
    fn disabled_required_flag_excludes_entry() {
        let (cache, flags, resolver) = setup(WeftOptions::default());
        push(
            &cache,
            vec![PluginEntry {
                id: "p".to_string(),
                interactions: vec![
                    InteractionEntry {
                        required_flags: vec!["gated".to_string()],
                        ..entry("click", "gated-handler", 0)
                    },
                    entry("click", "open-handler", 1),
                ],
            }],
        );

        // "gated" is unknown, so fail-closed excludes the entry even though
        // its criteria match.
        let chain = resolver.resolve("click", &InteractionContext::new());
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].handler_ref, "open-handler");

        flags.set_flag_override("gated", true);
        let chain = resolver.resolve("click", &InteractionContext::new());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].handler_ref, "gated-handler");
    }

    #[test]
    fn resolution_is_deterministic() {
        let (cache, _, resolver) = setup(WeftOptions::default());
        push(
            &cache,
            vec![PluginEntry {
                id: "p".to_string(),
                interactions: vec![
                    entry("click", "a", 3),
                    entry("click", "b", 1),
                    entry("click", "c", 3),
                    entry("click", "d", 2),
                ],
            }],
        );

        let context = InteractionContext::new();
        let first = resolver.resolve("click", &context);
        for _ in 0..10 {
            assert_eq!(resolver.resolve("click", &context), first);
        }
    }

    #[traced_test]
    #[test]
    fn debug_logging_emits_resolution_events_when_enabled() {
        let options = WeftOptions {
            debug_logging: true,
            ..WeftOptions::default()
        };
        let (cache, _, resolver) = setup(options);
        push(
            &cache,
            vec![PluginEntry {
                id: "p".to_string(),
                interactions: vec![entry("click", "h", 0)],
            }],
        );
        resolver.resolve("click", &InteractionContext::new());
        assert!(logs_contain("interaction resolved"));
    }

    #[traced_test]
    #[test]
    fn resolution_is_silent_without_debug_logging() {
        let (_, _, resolver) = setup(WeftOptions::default());
        resolver.resolve("click", &InteractionContext::new());
        assert!(!logs_contain("no cached manifest"));
        assert!(!logs_contain("interaction resolved"));
    }

    #[test]
    fn version_guard_disabled_accepts_anything() {
        let (_, _, resolver) = setup(WeftOptions::default());
        let newer = PluginManifest {
            version: "2.0.0".to_string(),
            plugins: vec![],
        };
        let older = PluginManifest {
            version: "not-semver".to_string(),
            plugins: vec![],
        };
        assert!(resolver.observe_manifest(&newer).is_ok());
        assert!(resolver.observe_manifest(&older).is_ok());
    }

    #[test]
    fn strict_version_guard_rejects_regression() {
        let options = WeftOptions {
            strict_manifest_versioning: true,
            ..WeftOptions::default()
        };
        let (_, _, resolver) = setup(options);

        let manifest = |v: &str| PluginManifest {
            version: v.to_string(),
            plugins: vec![],
        };

        resolver.observe_manifest(&manifest("1.2.0")).unwrap();
        resolver.observe_manifest(&manifest("1.2.0")).unwrap();
        resolver.observe_manifest(&manifest("1.3.0")).unwrap();

        let err = resolver.observe_manifest(&manifest("1.2.9")).unwrap_err();
        assert!(matches!(err, WeftError::ManifestVersion { .. }));

        // Rejected manifests do not move the accepted watermark.
        resolver.observe_manifest(&manifest("1.3.0")).unwrap();
    }

    #[test]
    fn strict_version_guard_requires_semver() {
        let options = WeftOptions {
            strict_manifest_versioning: true,
            ..WeftOptions::default()
        };
        let (_, _, resolver) = setup(options);
        let manifest = PluginManifest {
            version: "build-42".to_string(),
            plugins: vec![],
        };
        assert!(matches!(
            resolver.observe_manifest(&manifest),
            Err(WeftError::Manifest { .. })
        ));
    }
}
