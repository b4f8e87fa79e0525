// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI component catalog collaborators for the Weft host SDK.
//!
//! Simple state storage consumed by layers above the routing core: the
//! component inventory, the CSS class registry, and the component-to-markup
//! mapper. Storage formats and persistence stay with the host.

pub mod css;
pub mod inventory;
pub mod mapper;
mod notify;

pub use css::{CssChange, CssClassDef, CssRegistry};
pub use inventory::{Component, ComponentSummary, Inventory, InventoryChange};
pub use mapper::{map_component_to_template, tag_for_type, tag_from_json, ComponentTemplate};
pub use notify::SubscriptionId;
