//! Figma document types for parsing JSON from the Figma REST API.
//!
//! Nodes are validated once, here, at the tree boundary. Sub-records that fail to
//! parse (a paint without channels, a style with a string font size, ...) are
//! dropped for that field only and logged, so the rest of the node and its
//! children still take part in extraction. A mistyped `id`, `name` or `type`
//! falls back to its default instead of rejecting the node.

use palette::Srgb;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A Figma file response from the files endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub version: Option<String>,
    pub document: DesignNode,
    #[serde(default)]
    pub components: BTreeMap<String, Value>,
    #[serde(default)]
    pub styles: BTreeMap<String, Value>,
}

impl FigmaFile {
    /// Wrap an already materialized document tree.
    pub fn from_document(document: DesignNode) -> Self {
        Self {
            name: Some(document.name.clone()),
            last_modified: None,
            version: None,
            document,
            components: BTreeMap::new(),
            styles: BTreeMap::new(),
        }
    }
}

/// Figma node kinds. Unknown kinds are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Line,
    Vector,
    Star,
    RegularPolygon,
    BooleanOperation,
    Slice,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Document => "DOCUMENT",
            NodeType::Canvas => "CANVAS",
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Section => "SECTION",
            NodeType::Component => "COMPONENT",
            NodeType::ComponentSet => "COMPONENT_SET",
            NodeType::Instance => "INSTANCE",
            NodeType::Text => "TEXT",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Line => "LINE",
            NodeType::Vector => "VECTOR",
            NodeType::Star => "STAR",
            NodeType::RegularPolygon => "REGULAR_POLYGON",
            NodeType::BooleanOperation => "BOOLEAN_OPERATION",
            NodeType::Slice => "SLICE",
            NodeType::Other(raw) => raw,
        }
    }

    /// Lowercase form used in every output document.
    pub fn lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// Containers whose geometry and auto-layout fields describe spacing.
    pub fn is_layout_container(&self) -> bool {
        matches!(
            self,
            NodeType::Frame | NodeType::Group | NodeType::Component | NodeType::Instance
        )
    }
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::Other(String::new())
    }
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "DOCUMENT" => NodeType::Document,
            "CANVAS" | "PAGE" => NodeType::Canvas,
            "FRAME" => NodeType::Frame,
            "GROUP" => NodeType::Group,
            "SECTION" => NodeType::Section,
            "COMPONENT" => NodeType::Component,
            "COMPONENT_SET" => NodeType::ComponentSet,
            "INSTANCE" => NodeType::Instance,
            "TEXT" => NodeType::Text,
            "RECTANGLE" => NodeType::Rectangle,
            "ELLIPSE" => NodeType::Ellipse,
            "LINE" => NodeType::Line,
            "VECTOR" => NodeType::Vector,
            "STAR" => NodeType::Star,
            "REGULAR_POLYGON" => NodeType::RegularPolygon,
            "BOOLEAN_OPERATION" => NodeType::BooleanOperation,
            "SLICE" => NodeType::Slice,
            _ => NodeType::Other(raw),
        }
    }
}

impl From<NodeType> for String {
    fn from(kind: NodeType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the design tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_node_type")]
    pub node_type: NodeType,
    #[serde(default, deserialize_with = "node_list")]
    pub children: Vec<DesignNode>,
    #[serde(default, deserialize_with = "lenient")]
    pub visible: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient")]
    pub absolute_render_bounds: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<Vector2>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub fills: Option<Vec<Paint>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(default, deserialize_with = "lenient")]
    pub stroke_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub corner_radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub effects: Option<Vec<Effect>>,
    #[serde(default, deserialize_with = "lenient")]
    pub layout_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub layout_align: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_axis_align_items: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub item_spacing: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_left: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_right: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_top: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub padding_bottom: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub constraints: Option<Constraints>,
    #[serde(default, deserialize_with = "lenient")]
    pub background_color: Option<FigmaColor>,
    #[serde(default, deserialize_with = "lenient")]
    pub style: Option<TypeStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub characters: Option<String>,
}

impl DesignNode {
    pub fn new(node_type: NodeType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type,
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.absolute_bounding_box = Some(BoundingBox {
            x,
            y,
            width,
            height,
        });
        self
    }

    pub fn with_children(mut self, children: Vec<DesignNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.get_or_insert_with(Vec::new).push(paint);
        self
    }

    pub fn with_stroke(mut self, paint: Paint) -> Self {
        self.strokes.get_or_insert_with(Vec::new).push(paint);
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn with_text(mut self, characters: impl Into<String>, style: TypeStyle) -> Self {
        self.characters = Some(characters.into());
        self.style = Some(style);
        self
    }

    pub fn with_auto_layout(mut self, mode: &str, item_spacing: f64, padding: f64) -> Self {
        self.layout_mode = Some(mode.to_string());
        self.item_spacing = Some(item_spacing);
        self.padding_left = Some(padding);
        self.padding_right = Some(padding);
        self.padding_top = Some(padding);
        self.padding_bottom = Some(padding);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.get_or_insert_with(Vec::new).push(effect);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn lowercase_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Geometry used for layout purposes, falling back from the bounding box to
    /// render bounds and finally to a bare size vector anchored at the origin.
    pub fn resolved_bounds(&self) -> Option<BoundingBox> {
        if let Some(bb) = self.absolute_bounding_box {
            return Some(bb);
        }
        if let Some(bb) = self.absolute_render_bounds {
            return Some(bb);
        }
        self.size
            .filter(|s| s.x > 0.0 && s.y > 0.0)
            .map(|s| BoundingBox {
                x: 0.0,
                y: 0.0,
                width: s.x,
                height: s.y,
            })
    }

    /// True when the node is an auto-layout container (`NONE` does not count).
    pub fn auto_layout_mode(&self) -> Option<&str> {
        self.layout_mode
            .as_deref()
            .filter(|mode| !mode.eq_ignore_ascii_case("NONE"))
    }

    /// Paddings that are present, in left/right/top/bottom order.
    pub fn paddings(&self) -> [Option<f64>; 4] {
        [
            self.padding_left,
            self.padding_right,
            self.padding_top,
            self.padding_bottom,
        ]
    }

    pub fn has_paint(&self) -> bool {
        self.fills.as_ref().is_some_and(|f| !f.is_empty())
            || self.strokes.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// Bounding box coordinates from Figma.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Vector2 {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Layout constraints, passed through to child layout output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaintType {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Other(String),
}

impl PaintType {
    pub fn as_str(&self) -> &str {
        match self {
            PaintType::Solid => "SOLID",
            PaintType::GradientLinear => "GRADIENT_LINEAR",
            PaintType::GradientRadial => "GRADIENT_RADIAL",
            PaintType::GradientAngular => "GRADIENT_ANGULAR",
            PaintType::GradientDiamond => "GRADIENT_DIAMOND",
            PaintType::Image => "IMAGE",
            PaintType::Other(raw) => raw,
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(
            self,
            PaintType::GradientLinear
                | PaintType::GradientRadial
                | PaintType::GradientAngular
                | PaintType::GradientDiamond
        )
    }
}

impl Default for PaintType {
    fn default() -> Self {
        PaintType::Other(String::new())
    }
}

impl From<String> for PaintType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "SOLID" => PaintType::Solid,
            "GRADIENT_LINEAR" => PaintType::GradientLinear,
            "GRADIENT_RADIAL" => PaintType::GradientRadial,
            "GRADIENT_ANGULAR" => PaintType::GradientAngular,
            "GRADIENT_DIAMOND" => PaintType::GradientDiamond,
            "IMAGE" => PaintType::Image,
            _ => PaintType::Other(raw),
        }
    }
}

impl From<PaintType> for String {
    fn from(kind: PaintType) -> Self {
        kind.as_str().to_string()
    }
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub paint_type: PaintType,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<FigmaColor>,
    #[serde(default, deserialize_with = "lenient")]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub visible: Option<bool>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub gradient_stops: Vec<ColorStop>,
}

impl Paint {
    pub fn solid(color: FigmaColor) -> Self {
        Self {
            paint_type: PaintType::Solid,
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn linear_gradient(stops: Vec<FigmaColor>) -> Self {
        let count = stops.len().max(2) - 1;
        Self {
            paint_type: PaintType::GradientLinear,
            gradient_stops: stops
                .into_iter()
                .enumerate()
                .map(|(i, color)| ColorStop {
                    color: Some(color),
                    position: i as f64 / count as f64,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Hex of a solid paint; gradients and images have none.
    pub fn solid_hex(&self) -> Option<String> {
        match self.paint_type {
            PaintType::Solid => self.color.map(|c| c.to_hex()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorStop {
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<FigmaColor>,
    #[serde(default)]
    pub position: f64,
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FigmaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl FigmaColor {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a `#rrggbb` string into a fully opaque color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
        Some(Self::rgb(
            rgb.red as f64 / 255.0,
            rgb.green as f64 / 255.0,
            rgb.blue as f64 / 255.0,
        ))
    }

    /// Convert to hex color string (e.g., "#ff8000").
    ///
    /// Channels are rounded so a color parsed from a hex string converts back
    /// to exactly the same string. Alpha is ignored.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Typography style from Figma.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, deserialize_with = "lenient")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_weight: Option<FontWeightValue>,
    #[serde(default, deserialize_with = "lenient")]
    pub line_height_px: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub line_height_percent_font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub line_height: Option<Dimension>,
    #[serde(default, deserialize_with = "lenient")]
    pub letter_spacing: Option<Dimension>,
    #[serde(default, deserialize_with = "lenient")]
    pub text_align_horizontal: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text_case: Option<String>,
}

impl TypeStyle {
    pub fn new(font_family: &str, font_size: f64, font_weight: f64) -> Self {
        Self {
            font_family: Some(font_family.to_string()),
            font_size: Some(font_size),
            font_weight: Some(FontWeightValue::Numeric(font_weight)),
            ..Default::default()
        }
    }
}

/// Font weights arrive either as numbers or as CSS-like keywords.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FontWeightValue {
    Numeric(f64),
    Keyword(String),
}

/// A number, or a plugin-style `{value, unit}` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Value(f64),
    WithUnit {
        value: f64,
        #[serde(default)]
        unit: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    Other(String),
}

impl Default for EffectType {
    fn default() -> Self {
        EffectType::Other(String::new())
    }
}

impl From<String> for EffectType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "DROP_SHADOW" => EffectType::DropShadow,
            "INNER_SHADOW" => EffectType::InnerShadow,
            "LAYER_BLUR" => EffectType::LayerBlur,
            "BACKGROUND_BLUR" => EffectType::BackgroundBlur,
            _ => EffectType::Other(raw),
        }
    }
}

impl From<EffectType> for String {
    fn from(kind: EffectType) -> Self {
        match kind {
            EffectType::DropShadow => "DROP_SHADOW".to_string(),
            EffectType::InnerShadow => "INNER_SHADOW".to_string(),
            EffectType::LayerBlur => "LAYER_BLUR".to_string(),
            EffectType::BackgroundBlur => "BACKGROUND_BLUR".to_string(),
            EffectType::Other(raw) => raw,
        }
    }
}

/// Shadow or blur effect attached to a node.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type", default)]
    pub effect_type: EffectType,
    #[serde(default, deserialize_with = "lenient")]
    pub radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<FigmaColor>,
    #[serde(default, deserialize_with = "lenient")]
    pub offset: Option<Vector2>,
    #[serde(default, deserialize_with = "lenient")]
    pub spread: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub visible: Option<bool>,
}

impl Effect {
    pub fn drop_shadow(x: f64, y: f64, radius: f64, color: FigmaColor) -> Self {
        Self {
            effect_type: EffectType::DropShadow,
            radius: Some(radius),
            color: Some(color),
            offset: Some(Vector2 { x, y }),
            ..Default::default()
        }
    }

    pub fn layer_blur(radius: f64) -> Self {
        Self {
            effect_type: EffectType::LayerBlur,
            radius: Some(radius),
            ..Default::default()
        }
    }
}

/// Deserialize an optional field, treating a malformed value as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        if v.is_null() {
            return None;
        }
        match serde_json::from_value(v) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed node field");
                None
            }
        }
    }))
}

/// Deserialize an optional list, dropping elements that fail to parse.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Ok(None),
        Some(other) => {
            tracing::warn!(value = %other, "expected a list; skipping field");
            return Ok(None);
        }
    };

    let parsed = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed list entry");
                None
            }
        })
        .collect();
    Ok(Some(parsed))
}

/// Versions are strings in file responses but numbers in some exports.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_list(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, String>(deserializer)?.unwrap_or_default())
}

fn lenient_node_type<'de, D>(deserializer: D) -> Result<NodeType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, NodeType>(deserializer)?.unwrap_or_default())
}

/// One entry of a `children` array. Entries that are not JSON objects are
/// consumed and reported as `None`.
struct ChildSlot(Option<DesignNode>);

impl<'de> Deserialize<'de> for ChildSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ChildSlotVisitor)
    }
}

struct ChildSlotVisitor;

impl<'de> Visitor<'de> for ChildSlotVisitor {
    type Value = ChildSlot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ChildSlot, A::Error> {
        DesignNode::deserialize(MapAccessDeserializer::new(map)).map(|node| ChildSlot(Some(node)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ChildSlot, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ChildSlot(None))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<ChildSlot, E> {
        Ok(ChildSlot(None))
    }
}

/// Children are read element by element straight from the input, so a deep
/// tree is parsed once. Non-object entries are skipped; a non-array value
/// yields no children.
fn node_list<'de, D>(deserializer: D) -> Result<Vec<DesignNode>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NodeListVisitor)
}

struct NodeListVisitor;

impl<'de> Visitor<'de> for NodeListVisitor {
    type Value = Vec<DesignNode>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of nodes")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut nodes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(ChildSlot(slot)) = seq.next_element()? {
            match slot {
                Some(node) => nodes.push(node),
                None => tracing::warn!("skipping child entry that is not a node object"),
            }
        }
        Ok(nodes)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        tracing::warn!("expected a list of children; skipping field");
        Ok(Vec::new())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}
