// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Weft host SDK.

use thiserror::Error;

/// The primary error type used across the Weft SDK crates.
#[derive(Debug, Error)]
pub enum WeftError {
    /// A manifest record failed boundary validation (empty id, duplicate
    /// plugin, missing handler ref). `path` locates the offending record.
    #[error("invalid manifest record at {path}: {message}")]
    Manifest { path: String, message: String },

    /// The manifest source collaborator failed to produce a manifest.
    /// The cache keeps its prior state when this is raised.
    #[error("manifest fetch failed: {source}")]
    ManifestFetch {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A manifest's version regressed while strict versioning is enabled.
    #[error("manifest version regression: {incoming} is older than accepted {current}")]
    ManifestVersion { current: String, incoming: String },

    /// A handler in a resolved chain failed during dispatch. Carried in
    /// the dispatch outcome; never aborts delivery to later handlers.
    #[error("handler '{handler_ref}' failed: {message}")]
    Handler {
        handler_ref: String,
        message: String,
    },

    /// A handler ref survived resolution but no handler is registered
    /// under that name.
    #[error("no handler registered for '{handler_ref}'")]
    HandlerNotRegistered { handler_ref: String },

    /// Attempt to create a CSS class that already exists.
    #[error("css class '{name}' already exists")]
    DuplicateClass { name: String },

    /// Attempt to update a CSS class that does not exist.
    #[error("css class '{name}' not found")]
    ClassNotFound { name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WeftError {
    /// Wrap an arbitrary collaborator error as a fetch failure.
    pub fn fetch(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        WeftError::ManifestFetch {
            source: Box::new(source),
        }
    }

    /// Convenience constructor for manifest validation errors.
    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        WeftError::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
