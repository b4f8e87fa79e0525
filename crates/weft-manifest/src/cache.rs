// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest cache.
//!
//! Decouples manifest acquisition (host-provided, possibly network-backed)
//! from consumption. Reads are synchronous and never block on I/O; a cold
//! miss goes through a single-flight fetch gate so concurrent callers share
//! one round-trip to the host.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{info, warn};
use weft_core::WeftError;

use crate::manifest::{validate_manifest, PluginManifest};

/// Host collaborator that produces manifests on a cold cache miss.
///
/// Timeout and cancellation are the host's contract; the cache surfaces a
/// failure as [`WeftError::ManifestFetch`] and retries nothing itself.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch_manifest(&self) -> Result<PluginManifest, WeftError>;
}

/// A manifest together with the logical time it entered the cache.
#[derive(Debug, Clone)]
pub struct CachedManifest {
    pub manifest: Arc<PluginManifest>,
    /// Monotonically increasing per-cache sequence; writes replace, never
    /// merge, so a reader can order observations by this alone.
    pub fetched_at: u64,
}

struct CacheState {
    entry: Option<CachedManifest>,
    /// Cleared by [`ManifestCache::invalidate`]; the entry is retained but
    /// hidden until the next successful fetch or push.
    valid: bool,
    /// Last allocated `fetched_at`. Bumped under the same write lock that
    /// publishes the entry, so a later sequence can never be overwritten by
    /// an earlier one.
    sequence: u64,
}

/// Versioned cache in front of a [`ManifestSource`].
pub struct ManifestCache {
    source: Arc<dyn ManifestSource>,
    state: RwLock<CacheState>,
    /// Serializes fetch-on-miss episodes: at most one outstanding fetch.
    fetch_gate: tokio::sync::Mutex<()>,
}

impl ManifestCache {
    /// Create an empty cache in front of the given source.
    pub fn new(source: Arc<dyn ManifestSource>) -> Self {
        Self {
            source,
            state: RwLock::new(CacheState {
                entry: None,
                valid: false,
                sequence: 0,
            }),
            fetch_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// The cached manifest, fetching through the source on a cold miss.
    ///
    /// Concurrent callers during one cold-miss episode coalesce into a single
    /// underlying fetch. A fetch failure leaves the cache in its prior state
    /// and surfaces the error.
    pub async fn get_plugin_manifest(&self) -> Result<Arc<PluginManifest>, WeftError> {
        if let Some(manifest) = self.cached_plugin_manifest() {
            return Ok(manifest);
        }

        let _gate = self.fetch_gate.lock().await;
        // A coalesced waiter finds the cache populated by the fetch it
        // queued behind.
        if let Some(manifest) = self.cached_plugin_manifest() {
            return Ok(manifest);
        }

        let manifest = match self.source.fetch_manifest().await {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(error = %err, "manifest fetch failed; cache left untouched");
                return Err(err);
            }
        };
        validate_manifest(&manifest)?;
        Ok(self.store(manifest).manifest)
    }

    /// Pure read of current cache state. Never fetches.
    pub fn cached_plugin_manifest(&self) -> Option<Arc<PluginManifest>> {
        let state = self.state.read().expect("manifest cache poisoned");
        if state.valid {
            state.entry.as_ref().map(|c| c.manifest.clone())
        } else {
            None
        }
    }

    /// Current cache entry with its `fetched_at` sequence. Never fetches.
    pub fn cached(&self) -> Option<CachedManifest> {
        let state = self.state.read().expect("manifest cache poisoned");
        if state.valid { state.entry.clone() } else { None }
    }

    /// Host-driven push. Validates the records, then overwrites the cache
    /// unconditionally and bumps `fetched_at`: last-write-wins regardless of
    /// the manifest's own version field (version policy lives in the
    /// resolver).
    pub fn set_plugin_manifest(&self, manifest: PluginManifest) -> Result<u64, WeftError> {
        validate_manifest(&manifest)?;
        let entry = self.store(manifest);
        info!(
            version = entry.manifest.version.as_str(),
            fetched_at = entry.fetched_at,
            "manifest pushed by host"
        );
        Ok(entry.fetched_at)
    }

    /// Explicitly invalidate the cache; the next `get_plugin_manifest`
    /// triggers a fetch.
    pub fn invalidate(&self) {
        let mut state = self.state.write().expect("manifest cache poisoned");
        state.valid = false;
    }

    fn store(&self, manifest: PluginManifest) -> CachedManifest {
        let mut state = self.state.write().expect("manifest cache poisoned");
        state.sequence += 1;
        let entry = CachedManifest {
            manifest: Arc::new(manifest),
            fetched_at: state.sequence,
        };
        state.entry = Some(entry.clone());
        state.valid = true;
        entry
    }
}
