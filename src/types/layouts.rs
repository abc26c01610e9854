//! Screen layout output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::figma::Constraints;

/// The `screen_layouts` artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayouts {
    pub screens: Vec<ScreenLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_patterns: Option<LayoutPatterns>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grid_systems: Vec<GridSystem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub size: ScreenSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub children: Vec<ChildLayout>,
    pub layout: LayoutRule,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Placement and style of one direct child of a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildLayout {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Position among all of the screen's children, including skipped ones.
    pub index: usize,
    pub size: Size,
    pub position: Position,
    pub visible: bool,
    pub style: ChildStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    /// Fingerprint of the component this child was catalogued as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildStyle {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub background_colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    AutoLayout,
    Manual,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::AutoLayout => "auto-layout",
            LayoutKind::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRule {
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

impl LayoutRule {
    pub fn manual() -> Self {
        Self {
            kind: LayoutKind::Manual,
            direction: None,
            spacing: None,
            padding: None,
            alignment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

/// Regular child spacing detected on one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSystem {
    pub screen: String,
    pub x_spacing: Option<f64>,
    pub y_spacing: Option<f64>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

/// Patterns aggregated across every screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPatterns {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_spacing: Vec<f64>,
    pub screen_sizes: Vec<Size>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub layout_directions: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub total_screens: usize,
    pub screen_sizes: ScreenSizeSummary,
    pub layout_types: BTreeMap<String, usize>,
    pub children_counts: ChildrenCounts,
    pub spacing_patterns_found: usize,
    pub grid_systems_detected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSizeSummary {
    /// `[min, max]`, absent when there are no screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_range: Option<[f64; 2]>,
    pub unique_sizes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildrenCounts {
    pub total: usize,
    pub average: f64,
    pub max: usize,
}
