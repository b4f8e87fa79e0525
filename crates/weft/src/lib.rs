// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weft, a host SDK for manifest-driven UI plugin routing.
//!
//! Independently built UI plugins discover each other, exchange events, and
//! query capability metadata through this SDK without being statically linked
//! together. This crate is the single public surface; the pieces live in the
//! focused member crates:
//!
//! - [`FlagStore`]: feature flags with override precedence and usage auditing
//! - [`ManifestCache`]: versioned plugin manifest cache with single-flight fetch
//! - [`InteractionResolver`]: interaction id + context -> ordered handler chain
//! - [`EventRouter`]: runtime event dispatch with per-handler failure isolation
//! - [`Inventory`] / [`CssRegistry`] / component mapper: catalog collaborators
//!
//! # Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! use weft::{
//!     EventRouter, FlagStore, HostContext, InteractionResolver, ManifestCache,
//!     ManifestSource, WeftOptions,
//! };
//!
//! # fn wire(source: Arc<dyn ManifestSource>) {
//! let options = WeftOptions::default();
//! let host = HostContext::detached();
//! let cache = Arc::new(ManifestCache::new(source));
//! let flags = Arc::new(FlagStore::new(host, &options));
//! let resolver = InteractionResolver::new(cache, flags, &options);
//! let router = EventRouter::new(resolver);
//! # let _ = router;
//! # }
//! ```

pub use weft_core::{HostConfig, HostContext, WeftError, WeftOptions};
pub use weft_flags::{EvaluationTier, FlagDefinition, FlagStore, UsageLogEntry};
pub use weft_manifest::{
    criteria_matches, parse_manifest, validate_manifest, CachedManifest, InteractionContext,
    InteractionEntry, ManifestCache, ManifestSource, MatchCriteria, PluginEntry, PluginManifest,
};
pub use weft_router::{
    DispatchEvent, DispatchOutcome, EventHandler, EventRouter, InteractionResolver,
    ResolvedHandler, ResolvedHandlerChain,
};

pub use weft_catalog::{
    map_component_to_template, tag_for_type, tag_from_json, Component, ComponentSummary,
    ComponentTemplate, CssChange, CssClassDef, CssRegistry, Inventory, InventoryChange,
    SubscriptionId,
};
