// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component-to-markup mapping.
//!
//! Maps abstract component types to concrete markup tags and turns a JSON
//! component definition into a render-ready template. Unknown types fall back
//! to `"div"` so a stale manifest never breaks rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::inventory::Component;

/// Render-ready shape derived from a component definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Markup tag to render.
    pub tag: String,
    /// CSS class names, in definition order.
    pub classes: Vec<String>,
    /// Flat attribute map.
    pub attributes: BTreeMap<String, String>,
    /// Optional text content.
    pub text: Option<String>,
}

/// Markup tag for a component type. Unknown types map to `"div"`.
pub fn tag_for_type(component_type: &str) -> &'static str {
    match component_type {
        "button" => "button",
        "input" => "input",
        "image" => "img",
        "paragraph" | "text" => "p",
        "heading" => "h2",
        "line" => "hr",
        "svg" => "svg",
        "container" | "div" => "div",
        _ => "div",
    }
}

/// Tag for a raw JSON component document, read from its `"type"` field.
///
/// Missing or non-string types fall back to `"div"`.
pub fn tag_from_json(definition: &serde_json::Value) -> String {
    definition
        .get("type")
        .and_then(|t| t.as_str())
        .map(tag_for_type)
        .unwrap_or("div")
        .to_string()
}

/// Map a stored component into a render-ready template.
///
/// Reads `classes` (array of strings), `attributes` (object of strings), and
/// `text` out of the definition document; anything malformed is skipped
/// rather than failing, since definitions arrive from loosely-typed hosts.
pub fn map_component_to_template(component: &Component) -> ComponentTemplate {
    let definition = &component.definition;

    let classes = definition
        .get("classes")
        .and_then(|c| c.as_array())
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let attributes = definition
        .get("attributes")
        .and_then(|a| a.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();

    let text = definition
        .get("text")
        .and_then(|t| t.as_str())
        .map(str::to_string);

    ComponentTemplate {
        tag: tag_for_type(&component.component_type).to_string(),
        classes,
        attributes,
        text,
    }
}
