//! Component catalog output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::normalize::TextProperties;

/// The `component_catalog` artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentCatalog {
    pub components: Vec<ComponentSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Interactive,
    Display,
    Layout,
    Text,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Interactive => "interactive",
            ComponentType::Display => "display",
            ComponentType::Layout => "layout",
            ComponentType::Text => "text",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComponentType::Interactive => "Interactive UI component with user interactions",
            ComponentType::Display => "Visual component for displaying content",
            ComponentType::Layout => "Layout component for organizing content",
            ComponentType::Text => "Typography component for text display",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component, identified by its fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub category: String,
    pub fingerprint: String,
    pub instance_count: usize,
    pub props: ComponentProps,
    pub variants: Vec<ComponentVariant>,
    pub children: Vec<ComponentChild>,
    /// Properties that differ between instances. Informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub varying_properties: Vec<String>,
    pub description: String,
}

/// Flattened visual and text properties of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentProps {
    #[serde(rename = "type")]
    pub node_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<PaintProps>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<PaintProps>,
    #[serde(
        default,
        rename = "cornerRadius",
        skip_serializing_if = "Option::is_none"
    )]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(flatten)]
    pub typography: Option<TextProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A solid paint. `weight` is set for strokes only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintProps {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub color: String,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentVariant {
    pub name: String,
    pub props: ComponentProps,
    pub example_usage: String,
}

/// Shallow description of a component's direct child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentChild {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub total_components: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub with_variants: usize,
}
