// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSS class registry.
//!
//! Tracks the class definitions plugins contribute at runtime, independent of
//! the routing core. Creation and update are distinct operations so callers
//! catch accidental redefinition early.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_core::WeftError;

use crate::notify::{SubscriberSet, SubscriptionId};

/// One named CSS class and its declaration block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssClassDef {
    /// Class name without the leading dot.
    pub name: String,
    /// Declaration block content, e.g. `"color: red; padding: 4px"`.
    pub declarations: String,
}

/// Change event delivered to registry subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssChange {
    Created { name: String },
    Updated { name: String },
}

/// In-memory CSS class registry with change notification.
pub struct CssRegistry {
    classes: Mutex<HashMap<String, CssClassDef>>,
    subscribers: SubscriberSet<CssChange>,
}

impl CssRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            classes: Mutex::new(HashMap::new()),
            subscribers: SubscriberSet::new(),
        }
    }

    /// Returns true when a class with this name exists.
    pub fn has_class(&self, name: &str) -> bool {
        let classes = self.classes.lock().expect("css registry poisoned");
        classes.contains_key(name)
    }

    /// Register a new class. Fails when the name is already taken.
    pub fn create_class(&self, def: CssClassDef) -> Result<(), WeftError> {
        let name = def.name.clone();
        {
            let mut classes = self.classes.lock().expect("css registry poisoned");
            if classes.contains_key(&name) {
                return Err(WeftError::DuplicateClass { name });
            }
            classes.insert(name.clone(), def);
        }
        debug!(name = name.as_str(), "css class created");
        self.subscribers.notify(&CssChange::Created { name });
        Ok(())
    }

    /// Replace the declarations of an existing class.
    pub fn update_class(&self, name: &str, declarations: String) -> Result<(), WeftError> {
        {
            let mut classes = self.classes.lock().expect("css registry poisoned");
            let def = classes.get_mut(name).ok_or_else(|| WeftError::ClassNotFound {
                name: name.to_string(),
            })?;
            def.declarations = declarations;
        }
        self.subscribers.notify(&CssChange::Updated {
            name: name.to_string(),
        });
        Ok(())
    }

    /// The stored definition for a class, or `None` when unknown.
    pub fn class_def(&self, name: &str) -> Option<CssClassDef> {
        let classes = self.classes.lock().expect("css registry poisoned");
        classes.get(name).cloned()
    }

    /// Subscribe to class changes; callbacks run synchronously on the
    /// mutating call.
    pub fn on_css_changed(
        &self,
        callback: impl Fn(&CssChange) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Drop a change subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl Default for CssRegistry {
    fn default() -> Self {
        Self::new()
    }
}
