// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-mostly catalog of UI component definitions.
//!
//! Higher layers list and look up components here; the routing core never
//! touches it. Storage is in-memory; persistence is the host's concern.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::notify::{SubscriberSet, SubscriptionId};

/// Lightweight listing record for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub id: String,
    pub name: String,
    pub component_type: String,
}

/// A full component record, including its host-supplied JSON definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub component_type: String,
    /// Raw definition document (styles, attributes, template content).
    #[serde(default)]
    pub definition: serde_json::Value,
}

impl Component {
    pub fn summary(&self) -> ComponentSummary {
        ComponentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            component_type: self.component_type.clone(),
        }
    }
}

/// Change event delivered to inventory subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryChange {
    Upserted { id: String },
    Removed { id: String },
}

/// In-memory component inventory with change notification.
pub struct Inventory {
    components: Mutex<HashMap<String, Component>>,
    subscribers: SubscriberSet<InventoryChange>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self {
            components: Mutex::new(HashMap::new()),
            subscribers: SubscriberSet::new(),
        }
    }

    /// Summaries of all components, sorted by id.
    pub fn list_components(&self) -> Vec<ComponentSummary> {
        let components = self.components.lock().expect("inventory poisoned");
        let mut summaries: Vec<ComponentSummary> =
            components.values().map(Component::summary).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Full record for one component, or `None` when unknown.
    pub fn component_by_id(&self, id: &str) -> Option<Component> {
        let components = self.components.lock().expect("inventory poisoned");
        components.get(id).cloned()
    }

    /// Insert or replace a component, then notify subscribers.
    pub fn upsert_component(&self, component: Component) {
        let id = component.id.clone();
        {
            let mut components = self.components.lock().expect("inventory poisoned");
            components.insert(id.clone(), component);
        }
        debug!(id = id.as_str(), "component upserted");
        self.subscribers.notify(&InventoryChange::Upserted { id });
    }

    /// Remove a component. Subscribers are notified only when something was
    /// actually removed.
    pub fn remove_component(&self, id: &str) -> Option<Component> {
        let removed = {
            let mut components = self.components.lock().expect("inventory poisoned");
            components.remove(id)
        };
        if removed.is_some() {
            self.subscribers.notify(&InventoryChange::Removed {
                id: id.to_string(),
            });
        }
        removed
    }

    /// Subscribe to inventory changes; callbacks run synchronously on the
    /// mutating call.
    pub fn on_inventory_changed(
        &self,
        callback: impl Fn(&InventoryChange) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Drop a change subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.components.lock().expect("inventory poisoned").len()
    }

    /// Returns true when the inventory holds no components.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
