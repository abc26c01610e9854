//! Design token output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::normalize::SpacingScale;

/// The `design_tokens` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTokens {
    pub colors: ColorTokens,
    pub typography: TypographyTokens,
    pub spacing: SpacingScale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectTokens>,
}

/// Colors partitioned into three disjoint name → `#rrggbb` maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorTokens {
    pub semantic: BTreeMap<String, String>,
    pub neutral: BTreeMap<String, String>,
    pub brand: BTreeMap<String, String>,
}

impl ColorTokens {
    pub fn len(&self) -> usize {
        self.semantic.len() + self.neutral.len() + self.brand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every hex value across the three categories.
    pub fn all_values(&self) -> impl Iterator<Item = &str> {
        self.semantic
            .values()
            .chain(self.neutral.values())
            .chain(self.brand.values())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTokens {
    pub font_family: String,
    pub font_sizes: BTreeMap<String, f64>,
    pub font_weights: BTreeMap<String, u16>,
    pub line_heights: BTreeMap<String, f64>,
    /// Named text styles, one per distinct (size, weight) pair.
    pub styles: BTreeMap<String, TypographyToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyToken {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub line_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTokens {
    #[serde(default)]
    pub shadows: Vec<NamedValue<String>>,
    #[serde(default)]
    pub blurs: Vec<NamedValue<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue<T> {
    pub name: String,
    pub value: T,
}

/// Counts reported in run metadata and the Markdown report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub colors: usize,
    pub typography_tokens: usize,
    pub spacing_values: usize,
    pub effects_shadows: usize,
    pub effects_blurs: usize,
}
