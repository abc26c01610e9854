//! Design token extraction.
//!
//! A single pre-order walk feeds a fresh [`TokenAccumulator`] with raw
//! observations (color hex values, text styles, spacing measurements,
//! effects). Classification into named tokens only happens once the walk is
//! complete, and every classification step iterates sorted collections, so
//! the resulting tokens do not depend on the order nodes were visited in.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::extractor::{Analyzer, Stage};
use crate::figma::{DesignNode, NodeType, Paint};
use crate::normalize::color::{categorize_color, semantic_hint};
use crate::normalize::spacing::{build_spacing_scale, dominant_axis, positive_gaps};
use crate::normalize::typography::{
    font_size_scale_name, letter_spacing, line_height_ratio, normalize_font_weight, weight_name,
    SizeBand, DEFAULT_FONT_FAMILY,
};
use crate::normalize::{format_number, normalize_effect, EffectToken};
use crate::traversal::walk;
use crate::types::{
    ColorTokens, DesignTokens, EffectTokens, NamedValue, TokenSummary, TypographyToken,
    TypographyTokens,
};

/// Font size assumed for text nodes whose style carries none.
const FALLBACK_FONT_SIZE: f64 = 16.0;

/// One text node's normalized style.
#[derive(Debug, Clone, PartialEq)]
struct TextObservation {
    family: Option<String>,
    size: f64,
    weight: u16,
    line_height: f64,
    letter_spacing: Option<f64>,
}

impl TextObservation {
    /// Total order used to pick a group representative independent of visit order.
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.family
            .cmp(&other.family)
            .then(self.line_height.total_cmp(&other.line_height))
            .then_with(|| match (self.letter_spacing, other.letter_spacing) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            })
    }
}

/// Raw observations gathered during one walk. Never reused across documents.
#[derive(Debug, Default)]
pub struct TokenAccumulator {
    colors: BTreeSet<String>,
    /// hex → index of the earliest name hint that nominated it.
    color_hints: BTreeMap<String, usize>,
    text: Vec<TextObservation>,
    spacing: Vec<f64>,
    shadows: Vec<String>,
    blurs: Vec<f64>,
}

impl TokenAccumulator {
    fn observe(&mut self, node: &DesignNode, config: &ExtractorConfig) {
        self.observe_colors(node, config);
        if node.node_type == NodeType::Text {
            self.observe_text(node);
        }
        if node.node_type.is_layout_container() {
            self.observe_spacing(node);
        }
        for effect in node.effects.iter().flatten() {
            match normalize_effect(effect) {
                Some(EffectToken::Shadow(value)) => {
                    if !self.shadows.contains(&value) {
                        self.shadows.push(value);
                    }
                }
                Some(EffectToken::Blur(radius)) => {
                    if !self.blurs.contains(&radius) {
                        self.blurs.push(radius);
                    }
                }
                None => {}
            }
        }
    }

    fn observe_colors(&mut self, node: &DesignNode, config: &ExtractorConfig) {
        let hint = semantic_hint(&node.name, &config.colors.name_hints);

        for paint in node.fills.iter().flatten() {
            for hex in paint_colors(paint) {
                if let (Some(index), true) = (hint, paint.solid_hex().is_some()) {
                    self.color_hints
                        .entry(hex.clone())
                        .and_modify(|current| *current = (*current).min(index))
                        .or_insert(index);
                }
                self.colors.insert(hex);
            }
        }
        for paint in node.strokes.iter().flatten() {
            self.colors.extend(paint_colors(paint));
        }
    }

    fn observe_text(&mut self, node: &DesignNode) {
        let Some(style) = node.style.as_ref() else {
            tracing::debug!(node = %node.name, "text node without style; skipping typography");
            return;
        };
        self.text.push(TextObservation {
            family: style.font_family.clone().filter(|f| !f.trim().is_empty()),
            size: style
                .font_size
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(FALLBACK_FONT_SIZE),
            weight: style
                .font_weight
                .as_ref()
                .map(normalize_font_weight)
                .unwrap_or(400),
            line_height: line_height_ratio(style),
            letter_spacing: letter_spacing(style),
        });
    }

    fn observe_spacing(&mut self, node: &DesignNode) {
        if let Some(bounds) = node.absolute_bounding_box {
            self.spacing.extend([bounds.width, bounds.height]);
        }
        if node.auto_layout_mode().is_some() {
            if let Some(spacing) = node.item_spacing.filter(|s| *s > 0.0) {
                self.spacing.push(spacing);
            }
            self.spacing.extend(node.paddings().into_iter().flatten());
        }

        let boxes: Vec<_> = node
            .children
            .iter()
            .filter_map(|child| child.absolute_bounding_box)
            .collect();
        if boxes.len() >= 2 {
            let axis = dominant_axis(&boxes);
            self.spacing.extend(positive_gaps(&boxes, axis));
        }
    }
}

/// Solid paint color, or every stop of a gradient.
fn paint_colors(paint: &Paint) -> Vec<String> {
    if let Some(hex) = paint.solid_hex() {
        return vec![hex];
    }
    if paint.paint_type.is_gradient() {
        return paint
            .gradient_stops
            .iter()
            .filter_map(|stop| stop.color.map(|c| c.to_hex()))
            .collect();
    }
    Vec::new()
}

/// Insert under `base`, or `base-2`, `base-3`, ... when taken.
fn insert_unique<V>(map: &mut BTreeMap<String, V>, base: &str, value: V) {
    if !map.contains_key(base) {
        map.insert(base.to_string(), value);
        return;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !map.contains_key(&candidate) {
            map.insert(candidate, value);
            return;
        }
        n += 1;
    }
}

fn size_key(size: f64) -> i64 {
    (size * 100.0).round() as i64
}

/// Extracts the `design_tokens` artifact.
pub struct TokenExtractor<'a> {
    config: &'a ExtractorConfig,
}

impl<'a> TokenExtractor<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn extract_all_tokens(&self, root: &DesignNode) -> Result<DesignTokens> {
        let acc = self.collect(root)?;
        let tokens = DesignTokens {
            colors: self.classify_colors(&acc),
            typography: classify_typography(&acc.text),
            spacing: build_spacing_scale(
                &acc.spacing,
                &self.config.spacing.steps,
                self.config.spacing.tolerance,
            ),
            effects: build_effects(&acc),
        };
        tracing::debug!(
            colors = tokens.colors.len(),
            text_styles = tokens.typography.styles.len(),
            spacing_observations = acc.spacing.len(),
            "design tokens extracted"
        );
        Ok(tokens)
    }

    /// Walk the tree and gather raw observations.
    pub fn collect(&self, root: &DesignNode) -> Result<TokenAccumulator> {
        let mut acc = TokenAccumulator::default();
        walk(root, Stage::Tokens, self.config.max_depth, |node, _| {
            acc.observe(node, self.config);
            Ok(())
        })?;
        Ok(acc)
    }

    fn classify_colors(&self, acc: &TokenAccumulator) -> ColorTokens {
        let colors = &self.config.colors;
        let mut tokens = ColorTokens::default();
        let mut brand_index = 0;

        for hex in &acc.colors {
            if let Some(role) = colors.semantic_role(hex) {
                insert_unique(&mut tokens.semantic, role, hex.clone());
                continue;
            }
            if let Some(category) =
                categorize_color(hex, colors.gray_threshold).filter(|c| c.is_neutral())
            {
                insert_unique(&mut tokens.neutral, &category.name(), hex.clone());
                continue;
            }
            let hinted = acc
                .color_hints
                .get(hex)
                .and_then(|index| colors.name_hints.get(*index))
                .map(|(_, role)| role.as_str());
            match hinted {
                Some(role) => insert_unique(&mut tokens.semantic, role, hex.clone()),
                None => {
                    brand_index += 1;
                    insert_unique(&mut tokens.brand, &format!("brand-{brand_index}"), hex.clone());
                }
            }
        }
        tokens
    }

    /// Counts for run metadata.
    pub fn summary(tokens: &DesignTokens) -> TokenSummary {
        let (shadows, blurs) = tokens
            .effects
            .as_ref()
            .map_or((0, 0), |e| (e.shadows.len(), e.blurs.len()));
        TokenSummary {
            colors: tokens.colors.len(),
            typography_tokens: tokens.typography.styles.len(),
            spacing_values: tokens.spacing.len(),
            effects_shadows: shadows,
            effects_blurs: blurs,
        }
    }
}

impl Analyzer for TokenExtractor<'_> {
    type Output = DesignTokens;

    fn stage(&self) -> Stage {
        Stage::Tokens
    }

    fn analyze(&self, root: &DesignNode) -> Result<DesignTokens> {
        self.extract_all_tokens(root)
    }
}

fn classify_typography(observations: &[TextObservation]) -> TypographyTokens {
    let mut family_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for obs in observations {
        if let Some(family) = obs.family.as_deref() {
            *family_counts.entry(family).or_default() += 1;
        }
    }
    let mut font_family = DEFAULT_FONT_FAMILY;
    let mut best = 0;
    for (family, count) in &family_counts {
        if *count > best {
            font_family = *family;
            best = *count;
        }
    }

    // Representative per (size, weight): the smallest observation under `cmp_key`.
    let mut groups: BTreeMap<(i64, u16), &TextObservation> = BTreeMap::new();
    for obs in observations {
        groups
            .entry((size_key(obs.size), obs.weight))
            .and_modify(|current| {
                if obs.cmp_key(current) == Ordering::Less {
                    *current = obs;
                }
            })
            .or_insert(obs);
    }

    let mut weights_per_size: BTreeMap<i64, usize> = BTreeMap::new();
    for (size, _) in groups.keys() {
        *weights_per_size.entry(*size).or_default() += 1;
    }

    let mut styles = BTreeMap::new();
    for ((size, weight), obs) in &groups {
        let band = SizeBand::from_size(obs.size).as_str();
        let mut name = format!("{band}-{}", format_number(obs.size));
        if weights_per_size.get(size).copied().unwrap_or(0) > 1 {
            name = format!("{name}-{weight}");
        }
        styles.insert(
            name,
            TypographyToken {
                font_family: obs
                    .family
                    .clone()
                    .unwrap_or_else(|| font_family.to_string()),
                font_size: obs.size,
                font_weight: *weight,
                line_height: obs.line_height,
                letter_spacing: obs.letter_spacing,
            },
        );
    }

    let mut sizes: Vec<f64> = Vec::new();
    for ((_, _), obs) in &groups {
        if !sizes.iter().any(|s| size_key(*s) == size_key(obs.size)) {
            sizes.push(obs.size);
        }
    }
    let mut font_sizes = BTreeMap::new();
    if let [only] = sizes.as_slice() {
        font_sizes.insert("body".to_string(), *only);
    } else {
        for size in &sizes {
            insert_unique(&mut font_sizes, font_size_scale_name(*size), *size);
        }
    }

    let font_weights = groups
        .keys()
        .map(|(_, weight)| (weight_name(*weight).to_string(), *weight))
        .collect();

    let line_heights = observations
        .iter()
        .map(|obs| {
            (
                format!("leading-{}", (obs.line_height * 100.0).round() as i64),
                obs.line_height,
            )
        })
        .collect();

    TypographyTokens {
        font_family: font_family.to_string(),
        font_sizes,
        font_weights,
        line_heights,
        styles,
    }
}

fn build_effects(acc: &TokenAccumulator) -> Option<EffectTokens> {
    if acc.shadows.is_empty() && acc.blurs.is_empty() {
        return None;
    }
    Some(EffectTokens {
        shadows: acc
            .shadows
            .iter()
            .enumerate()
            .map(|(i, value)| NamedValue {
                name: format!("shadow-{}", i + 1),
                value: value.clone(),
            })
            .collect(),
        blurs: acc
            .blurs
            .iter()
            .enumerate()
            .map(|(i, radius)| NamedValue {
                name: format!("blur-{}", i + 1),
                value: *radius,
            })
            .collect(),
    })
}
