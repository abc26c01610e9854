//! Typography normalization: weights, line heights, size bands and the
//! flattened text properties used by component specs.

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::figma::{Dimension, FontWeightValue, TypeStyle};

/// Standard CSS weights, ascending.
pub const STANDARD_WEIGHTS: [u16; 9] = [100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Unitless line height used when a style gives nothing usable.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.4;

/// Family reported when no text node names one.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

const WEIGHT_KEYWORDS: &[(&str, u16)] = &[
    ("thin", 100),
    ("hairline", 100),
    ("extralight", 200),
    ("ultralight", 200),
    ("light", 300),
    ("normal", 400),
    ("regular", 400),
    ("book", 400),
    ("medium", 500),
    ("semibold", 600),
    ("demibold", 600),
    ("bold", 700),
    ("extrabold", 800),
    ("ultrabold", 800),
    ("black", 900),
    ("heavy", 900),
];

/// Snap a numeric weight to the nearest standard weight. Ties go to the heavier one.
pub fn snap_weight(raw: f64) -> u16 {
    if !raw.is_finite() {
        return 400;
    }
    let mut best = STANDARD_WEIGHTS[0];
    let mut best_distance = f64::INFINITY;
    for weight in STANDARD_WEIGHTS {
        let distance = (raw - weight as f64).abs();
        if distance <= best_distance {
            best = weight;
            best_distance = distance;
        }
    }
    best
}

/// Normalize a raw font weight (number or keyword) to a standard weight.
pub fn normalize_font_weight(value: &FontWeightValue) -> u16 {
    match value {
        FontWeightValue::Numeric(raw) => snap_weight(*raw),
        FontWeightValue::Keyword(word) => {
            let key: String = word
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect();
            if let Ok(raw) = key.parse::<f64>() {
                return snap_weight(raw);
            }
            WEIGHT_KEYWORDS
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, weight)| *weight)
                .unwrap_or(400)
        }
    }
}

/// CSS keyword for a standard weight.
pub fn weight_name(weight: u16) -> &'static str {
    match snap_weight(weight as f64) {
        100 => "thin",
        200 => "extralight",
        300 => "light",
        500 => "medium",
        600 => "semibold",
        700 => "bold",
        800 => "extrabold",
        900 => "black",
        _ => "normal",
    }
}

/// Unitless line height of a text style, rounded to two decimals.
///
/// Resolution order: `lineHeightPx / fontSize`, `lineHeightPercentFontSize`,
/// a plugin `{value, unit}` record, a bare number (ratios up to 4, pixels
/// above), then [`DEFAULT_LINE_HEIGHT`].
pub fn line_height_ratio(style: &TypeStyle) -> f64 {
    let size = style.font_size.filter(|s| *s > 0.0);

    let from_px = style.line_height_px.zip(size).map(|(px, s)| px / s);
    let from_percent = || style.line_height_percent_font_size.map(|p| p / 100.0);
    let from_record = || match style.line_height.as_ref()? {
        Dimension::WithUnit { value, unit } => {
            match unit.as_deref().map(str::to_ascii_uppercase).as_deref() {
                Some("PERCENT") => Some(value / 100.0),
                Some("PIXELS") | Some("PX") => size.map(|s| value / s),
                Some("AUTO") => None,
                _ => bare_line_height(*value, size),
            }
        }
        Dimension::Value(value) => bare_line_height(*value, size),
    };

    let ratio = from_px
        .or_else(from_percent)
        .or_else(from_record)
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(DEFAULT_LINE_HEIGHT);
    round_to(ratio, 2)
}

fn bare_line_height(value: f64, size: Option<f64>) -> Option<f64> {
    if value <= 4.0 {
        Some(value)
    } else {
        size.map(|s| value / s)
    }
}

/// Letter spacing in pixels, when present and non-zero.
pub fn letter_spacing(style: &TypeStyle) -> Option<f64> {
    let px = match style.letter_spacing.as_ref()? {
        Dimension::Value(v) => *v,
        Dimension::WithUnit { value, unit } => match unit.as_deref() {
            Some(u) if u.eq_ignore_ascii_case("PERCENT") => value / 100.0 * style.font_size?,
            _ => *value,
        },
    };
    (px.is_finite() && px != 0.0).then(|| round_to(px, 2))
}

/// Coarse size band used to name typography styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeBand {
    Heading,
    Subheading,
    Body,
    Caption,
}

impl SizeBand {
    pub fn from_size(size: f64) -> Self {
        if size >= 32.0 {
            SizeBand::Heading
        } else if size >= 20.0 {
            SizeBand::Subheading
        } else if size >= 16.0 {
            SizeBand::Body
        } else {
            SizeBand::Caption
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeBand::Heading => "heading",
            SizeBand::Subheading => "subheading",
            SizeBand::Body => "body",
            SizeBand::Caption => "caption",
        }
    }
}

/// Name of a size within the `fontSizes` scale.
pub fn font_size_scale_name(size: f64) -> &'static str {
    match size {
        s if s >= 40.0 => "heading-1",
        s if s >= 32.0 => "heading-2",
        s if s >= 24.0 => "heading-3",
        s if s >= 20.0 => "subheading",
        s if s >= 16.0 => "body",
        _ => "caption",
    }
}

/// Text properties flattened out of a node's style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    pub line_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
}

impl TextProperties {
    pub fn from_style(style: &TypeStyle) -> Self {
        Self {
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            font_weight: style.font_weight.as_ref().map(normalize_font_weight),
            line_height: line_height_ratio(style),
            letter_spacing: letter_spacing(style),
            text_align: style
                .text_align_horizontal
                .as_deref()
                .map(str::to_ascii_lowercase),
            text_transform: style.text_case.as_deref().and_then(text_transform),
        }
    }
}

fn text_transform(case: &str) -> Option<String> {
    let css = match case.to_ascii_uppercase().as_str() {
        "UPPER" => "uppercase",
        "LOWER" => "lowercase",
        "TITLE" => "capitalize",
        _ => return None,
    };
    Some(css.to_string())
}
