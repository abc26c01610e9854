//! Extractor configuration.
//!
//! Every heuristic table the analyzers consult lives here so it can be tuned
//! from a TOML file without touching the traversal code. All fields default
//! to the built-in tables; a config file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::clustering::{DEFAULT_COMMON_TOLERANCE, DEFAULT_GRID_TOLERANCE};
use crate::normalize::color::{
    normalize_hex, DEFAULT_GRAY_THRESHOLD, SEMANTIC_COLORS, SEMANTIC_NAME_HINTS,
};
use crate::normalize::spacing::{default_steps, DEFAULT_SPACING_TOLERANCE};
use crate::traversal::DEFAULT_MAX_DEPTH;

const INTERACTIVE_KEYWORDS: &[&str] = &[
    "button", "btn", "submit", "cancel", "close", "add", "delete", "edit", "save", "search",
    "filter", "menu", "toggle", "switch",
];

const INPUT_KEYWORDS: &[&str] = &[
    "input",
    "field",
    "textfield",
    "textarea",
    "searchbox",
    "email",
    "password",
    "name",
    "username",
];

const DISPLAY_KEYWORDS: &[&str] = &[
    "card", "badge", "avatar", "icon", "image", "photo", "banner", "header", "footer",
    "sidebar", "navbar",
];

const LAYOUT_KEYWORDS: &[&str] = &[
    "container", "layout", "grid", "row", "column", "stack", "section", "wrapper", "list",
];

const TYPOGRAPHY_KEYWORDS: &[&str] = &[
    "text", "title", "heading", "label", "paragraph", "caption",
];

const VARIANT_RULES: &[(&str, &[&str])] = &[
    ("primary", &["primary", "main"]),
    ("secondary", &["secondary", "alt"]),
    ("outline", &["outline", "ghost"]),
    ("small", &["small", "sm"]),
    ("large", &["large", "lg"]),
    ("hover", &["hover"]),
    ("active", &["active", "pressed"]),
    ("disabled", &["disabled"]),
];

/// Name given to instances no variant rule matches.
pub const DEFAULT_VARIANT: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Deepest node level any analyzer will descend to.
    pub max_depth: usize,
    pub colors: ColorConfig,
    pub spacing: SpacingConfig,
    pub components: ComponentConfig,
    pub layout: LayoutConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            colors: ColorConfig::default(),
            spacing: SpacingConfig::default(),
            components: ComponentConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Exact hex → semantic role lookup, consulted first.
    pub semantic: BTreeMap<String, String>,
    /// `(fragment, role)` pairs; a node name containing the fragment nominates
    /// its solid fills for the role. Earlier pairs win.
    pub name_hints: Vec<(String, String)>,
    pub gray_threshold: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            semantic: SEMANTIC_COLORS
                .iter()
                .map(|(hex, role)| (hex.to_string(), role.to_string()))
                .collect(),
            name_hints: SEMANTIC_NAME_HINTS
                .iter()
                .map(|(fragment, role)| (fragment.to_string(), role.to_string()))
                .collect(),
            gray_threshold: DEFAULT_GRAY_THRESHOLD,
        }
    }
}

impl ColorConfig {
    /// Semantic role of a hex value from the lookup table, case-insensitive.
    pub fn semantic_role(&self, hex: &str) -> Option<&str> {
        let wanted = normalize_hex(hex)?;
        self.semantic
            .iter()
            .find(|(key, _)| normalize_hex(key).as_deref() == Some(wanted.as_str()))
            .map(|(_, role)| role.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpacingConfig {
    /// `(step name, canonical px)` in ascending order.
    pub steps: Vec<(String, f64)>,
    pub tolerance: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            tolerance: DEFAULT_SPACING_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentConfig {
    /// Size window (both axes, inclusive) for plain rectangles to count as components.
    pub min_size: f64,
    pub max_size: f64,
    pub interactive_keywords: Vec<String>,
    pub input_keywords: Vec<String>,
    pub display_keywords: Vec<String>,
    pub layout_keywords: Vec<String>,
    pub typography_keywords: Vec<String>,
    pub variants: Vec<VariantRule>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            min_size: 20.0,
            max_size: 500.0,
            interactive_keywords: owned(INTERACTIVE_KEYWORDS),
            input_keywords: owned(INPUT_KEYWORDS),
            display_keywords: owned(DISPLAY_KEYWORDS),
            layout_keywords: owned(LAYOUT_KEYWORDS),
            typography_keywords: owned(TYPOGRAPHY_KEYWORDS),
            variants: VARIANT_RULES
                .iter()
                .map(|(name, keywords)| VariantRule {
                    name: name.to_string(),
                    keywords: owned(*keywords),
                })
                .collect(),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// A variant name and the name fragments that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantRule {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Absolute pixel tolerance for grid step clustering.
    pub grid_tolerance: f64,
    /// Relative tolerance for cross-screen common spacing.
    pub common_spacing_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_tolerance: DEFAULT_GRID_TOLERANCE,
            common_spacing_tolerance: DEFAULT_COMMON_TOLERANCE,
        }
    }
}

impl ExtractorConfig {
    /// Load from an explicit path, else the central config file, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path().filter(|p| p.is_file()) {
                Some(central) => Self::from_file(&central),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// `$XDG_CONFIG_HOME/dae/config.toml`, falling back to `~/.config/dae/config.toml`.
    pub fn central_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("dae").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be at least 1".to_string());
        }

        for key in self.colors.semantic.keys() {
            if normalize_hex(key).is_none() {
                return Err(format!("semantic color key '{key}' is not a #rrggbb hex value"));
            }
        }
        if self.colors.name_hints.iter().any(|(fragment, _)| fragment.trim().is_empty()) {
            return Err("color name hints need a non-empty fragment".to_string());
        }

        if self.spacing.steps.is_empty() {
            return Err("spacing scale needs at least one step".to_string());
        }
        let mut previous = 0.0;
        for (name, value) in &self.spacing.steps {
            if name.trim().is_empty() {
                return Err("spacing step names must be non-empty".to_string());
            }
            if !value.is_finite() || *value <= previous {
                return Err(format!(
                    "spacing step '{name}' must be positive and larger than the previous step"
                ));
            }
            previous = *value;
        }
        for (label, value) in [
            ("spacing tolerance", self.spacing.tolerance),
            ("layout grid_tolerance", self.layout.grid_tolerance),
            ("layout common_spacing_tolerance", self.layout.common_spacing_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{label} must be a non-negative number, got {value}"));
            }
        }

        let c = &self.components;
        if c.min_size < 0.0 || c.min_size > c.max_size {
            return Err(format!(
                "component size window [{}, {}] is empty",
                c.min_size, c.max_size
            ));
        }
        if c.variants.iter().any(|rule| rule.name.trim().is_empty()) {
            return Err("variant rules need a name".to_string());
        }
        Ok(())
    }
}
