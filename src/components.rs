//! Component identification and variant grouping.
//!
//! Runs in three passes:
//! 1. Identification walks the tree and buckets every qualifying node by its
//!    fingerprint, in order of first appearance.
//! 2. Variant analysis groups each bucket's instances by the variant word
//!    found in their names and records which properties differ.
//! 3. Synthesis turns each bucket into a [`ComponentSpec`].
//!
//! The fingerprint hashes the node type, the name with variant words removed,
//! the bounding box dimensions, the fill types and the corner radius, so
//! "Button Primary" and "Button Disabled" land in the same bucket when they
//! otherwise look alike.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::{ExtractorConfig, VariantRule, DEFAULT_VARIANT};
use crate::error::Result;
use crate::extractor::{Analyzer, Stage};
use crate::figma::{DesignNode, NodeType, Paint};
use crate::normalize::TextProperties;
use crate::traversal::walk;
use crate::types::{
    ComponentCatalog, ComponentChild, ComponentProps, ComponentSpec, ComponentSummary,
    ComponentType, ComponentVariant, PaintProps,
};

/// Default-generated layer name prefixes that carry no meaning.
const NOISE_PREFIXES: &[&str] = &["rectangle", "rect", "ellipse", "frame", "group", "vector"];

/// Lowercase, strip generated prefixes and `copy`/number suffixes, and
/// hyphenate. May return an empty string.
pub fn clean_name(name: &str) -> String {
    let mut cleaned = name.trim().to_lowercase();

    loop {
        let trimmed = cleaned.trim_end();
        if let Some(rest) = trimmed.strip_suffix(" copy") {
            cleaned = rest.to_string();
            continue;
        }
        match trimmed.rsplit_once(' ') {
            Some((rest, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => {
                cleaned = rest.to_string();
            }
            _ => break,
        }
    }

    let mut cleaned = cleaned.trim().to_string();
    for prefix in NOISE_PREFIXES {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            if rest.chars().next().map_or(true, |c| !c.is_alphanumeric()) {
                cleaned = rest
                    .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/'))
                    .to_string();
                break;
            }
        }
    }
    if cleaned.chars().all(|c| c.is_ascii_digit()) {
        cleaned.clear();
    }

    cleaned.trim().replace([' ', '_'], "-")
}

/// A cleaned name with whole segments from the variant vocabulary removed.
pub fn family_name(cleaned: &str, vocabulary: &BTreeSet<String>) -> String {
    cleaned
        .split(|c: char| matches!(c, '-' | '/' | '=' | ',') || c.is_whitespace())
        .filter(|segment| !segment.is_empty() && !vocabulary.contains(*segment))
        .collect::<Vec<_>>()
        .join("-")
}

/// First rule with a keyword contained in the name, else `default`.
pub fn variant_name(name: &str, rules: &[VariantRule]) -> String {
    let lower = name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k.as_str())))
        .map(|rule| rule.name.clone())
        .unwrap_or_else(|| DEFAULT_VARIANT.to_string())
}

fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

fn solid_paints(paints: Option<&Vec<Paint>>, stroke_weight: Option<f64>) -> Vec<PaintProps> {
    paints
        .into_iter()
        .flatten()
        .filter_map(|paint| {
            Some(PaintProps {
                paint_type: "solid".to_string(),
                color: paint.solid_hex()?,
                opacity: paint.opacity.unwrap_or(1.0),
                weight: stroke_weight,
            })
        })
        .collect()
}

/// Visual and text properties of a single node.
pub fn extract_props(node: &DesignNode) -> ComponentProps {
    let bounds = node.absolute_bounding_box;
    let is_text = node.node_type == NodeType::Text;
    ComponentProps {
        node_type: node.node_type.lowercase(),
        name: node.name.clone(),
        width: bounds.map(|b| b.width),
        height: bounds.map(|b| b.height),
        x: bounds.map(|b| b.x),
        y: bounds.map(|b| b.y),
        fills: solid_paints(node.fills.as_ref(), None),
        strokes: solid_paints(
            node.strokes.as_ref(),
            Some(node.stroke_weight.unwrap_or(1.0)),
        ),
        corner_radius: node.corner_radius,
        opacity: node.opacity,
        typography: node
            .style
            .as_ref()
            .filter(|_| is_text)
            .map(TextProperties::from_style),
        text: node.characters.clone().filter(|_| is_text),
    }
}

fn extract_children(node: &DesignNode) -> Vec<ComponentChild> {
    node.children
        .iter()
        .map(|child| ComponentChild {
            name: child.name.clone(),
            node_type: child.node_type.lowercase(),
            visible: child.is_visible(),
            width: child.absolute_bounding_box.map(|b| b.width),
            height: child.absolute_bounding_box.map(|b| b.height),
            text: child
                .characters
                .clone()
                .filter(|_| child.node_type == NodeType::Text),
        })
        .collect()
}

fn paint_types(paints: Option<&Vec<Paint>>) -> String {
    paints
        .into_iter()
        .flatten()
        .map(|p| p.paint_type.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Type, color and opacity of every paint, in order.
fn paint_signature(paints: Option<&Vec<Paint>>) -> String {
    paints
        .into_iter()
        .flatten()
        .map(|p| {
            format!(
                "{}:{}:{}",
                p.paint_type.as_str(),
                p.color.map(|c| c.to_hex()).unwrap_or_default(),
                p.opacity.unwrap_or(1.0)
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Properties (by output name) whose string form differs between instances.
fn varying_properties(instances: &[&DesignNode]) -> Vec<String> {
    if instances.len() < 2 {
        return Vec::new();
    }
    let probes: [(&str, fn(&DesignNode) -> String); 5] = [
        ("name", |n| n.name.clone()),
        ("fills", |n| paint_signature(n.fills.as_ref())),
        ("strokes", |n| paint_signature(n.strokes.as_ref())),
        ("cornerRadius", |n| format!("{:?}", n.corner_radius)),
        ("opacity", |n| format!("{:?}", n.opacity)),
    ];
    probes
        .iter()
        .filter(|(_, probe)| {
            let first = probe(instances[0]);
            instances[1..].iter().any(|n| probe(n) != first)
        })
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Identifies components and builds the `component_catalog` artifact.
pub struct ComponentParser<'a> {
    config: &'a ExtractorConfig,
    vocabulary: BTreeSet<String>,
}

impl<'a> ComponentParser<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        let mut vocabulary: BTreeSet<String> = config
            .components
            .variants
            .iter()
            .flat_map(|rule| rule.keywords.iter().chain(std::iter::once(&rule.name)))
            .map(|word| word.to_lowercase())
            .collect();
        vocabulary.insert(DEFAULT_VARIANT.to_string());
        Self { config, vocabulary }
    }

    /// Whether a node is a component candidate.
    pub fn qualifies(&self, node: &DesignNode) -> bool {
        match node.node_type {
            NodeType::Document | NodeType::Canvas => return false,
            NodeType::Component | NodeType::Instance => return true,
            _ => {}
        }

        let c = &self.config.components;
        let name = node.lowercase_name();
        if contains_any(&name, &c.interactive_keywords)
            || contains_any(&name, &c.input_keywords)
            || contains_any(&name, &c.display_keywords)
        {
            return true;
        }

        match node.node_type {
            // Any one of rounded corners, paint or a component-sized box is enough.
            NodeType::Rectangle => {
                let in_window = |v: f64| v >= c.min_size && v <= c.max_size;
                node.corner_radius.is_some_and(|r| r > 0.0)
                    || node.has_paint()
                    || node
                        .resolved_bounds()
                        .is_some_and(|b| in_window(b.width) && in_window(b.height))
            }
            NodeType::Group => has_component_structure(node),
            _ => false,
        }
    }

    /// Eight hex characters identifying "the same component".
    pub fn fingerprint(&self, node: &DesignNode) -> String {
        let family = family_name(&clean_name(&node.name), &self.vocabulary);
        let dims = node
            .absolute_bounding_box
            .map(|b| format!("{}x{}", b.width, b.height))
            .unwrap_or_default();
        let radius = node
            .corner_radius
            .map(|r| format!("r{r}"))
            .unwrap_or_default();
        let key = format!(
            "{}|{}|{}|{}|{}",
            node.node_type.as_str(),
            family,
            dims,
            paint_types(node.fills.as_ref()),
            radius
        );
        Sha256::digest(key.as_bytes())
            .iter()
            .take(4)
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// Fingerprint of `node` if it would be catalogued as a component.
    pub fn component_ref(&self, node: &DesignNode) -> Option<String> {
        self.qualifies(node).then(|| self.fingerprint(node))
    }

    pub fn component_type(&self, node: &DesignNode) -> ComponentType {
        let c = &self.config.components;
        let name = node.lowercase_name();
        if contains_any(&name, &c.interactive_keywords) || contains_any(&name, &c.input_keywords) {
            ComponentType::Interactive
        } else if contains_any(&name, &c.display_keywords) {
            ComponentType::Display
        } else if node.node_type == NodeType::Text {
            ComponentType::Text
        } else if matches!(node.node_type, NodeType::Frame | NodeType::Group)
            && node.children.len() > 2
        {
            ComponentType::Layout
        } else {
            ComponentType::Display
        }
    }

    /// Catalog grouping, decided from the final component name alone.
    pub fn category(&self, name: &str) -> &'static str {
        let c = &self.config.components;
        let name = name.to_lowercase();
        if name.contains("input") || name.contains("field") {
            "forms"
        } else if name.contains("button") || name.contains("btn") {
            "buttons"
        } else if contains_any(&name, &c.interactive_keywords)
            || contains_any(&name, &c.input_keywords)
        {
            "interactive"
        } else if name.contains("card") {
            "cards"
        } else if name.contains("badge") {
            "badges"
        } else if contains_any(&name, &c.display_keywords) {
            "display"
        } else if contains_any(&name, &c.layout_keywords) {
            "layout"
        } else if contains_any(&name, &c.typography_keywords) {
            "typography"
        } else {
            "general"
        }
    }

    pub fn parse_all_components(&self, root: &DesignNode) -> Result<ComponentCatalog> {
        let patterns = self.identify(root)?;
        let mut used_names = BTreeSet::new();
        let components: Vec<ComponentSpec> = patterns
            .into_iter()
            .map(|(fingerprint, instances)| self.synthesize(fingerprint, &instances, &mut used_names))
            .collect();
        tracing::debug!(components = components.len(), "components parsed");
        Ok(ComponentCatalog { components })
    }

    /// Pass 1: fingerprint buckets in order of first appearance.
    fn identify<'n>(&self, root: &'n DesignNode) -> Result<Vec<(String, Vec<&'n DesignNode>)>> {
        let mut patterns: Vec<(String, Vec<&'n DesignNode>)> = Vec::new();
        let mut index: BTreeMap<String, usize> = BTreeMap::new();
        walk(root, Stage::Components, self.config.max_depth, |node, _| {
            if !self.qualifies(node) {
                return Ok(());
            }
            let fingerprint = self.fingerprint(node);
            match index.get(&fingerprint) {
                Some(&i) => patterns[i].1.push(node),
                None => {
                    index.insert(fingerprint.clone(), patterns.len());
                    patterns.push((fingerprint, vec![node]));
                }
            }
            Ok(())
        })?;
        Ok(patterns)
    }

    /// Pass 2: instances grouped by variant name, in order of first appearance.
    fn group_variants<'n>(&self, instances: &[&'n DesignNode]) -> Vec<(String, Vec<&'n DesignNode>)> {
        let mut groups: Vec<(String, Vec<&'n DesignNode>)> = Vec::new();
        for node in instances {
            let name = variant_name(&node.name, &self.config.components.variants);
            match groups.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, members)) => members.push(node),
                None => groups.push((name, vec![node])),
            }
        }
        groups
    }

    /// Shared clean name, else the family name. `None` when both are empty.
    fn display_name(&self, instances: &[&DesignNode]) -> Option<String> {
        let representative = clean_name(&instances[0].name);
        let shared = instances
            .iter()
            .all(|node| clean_name(&node.name) == representative);
        let name = if shared {
            representative
        } else {
            family_name(&representative, &self.vocabulary)
        };
        (!name.is_empty()).then_some(name)
    }

    /// Pass 3.
    fn synthesize(
        &self,
        fingerprint: String,
        instances: &[&DesignNode],
        used_names: &mut BTreeSet<String>,
    ) -> ComponentSpec {
        let base = instances[0];
        let component_type = self.component_type(base);

        let display = self.display_name(instances);
        let category = self.category(display.as_deref().unwrap_or_default());
        let mut name = display.unwrap_or_else(|| format!("{component_type}-{fingerprint}"));
        if used_names.contains(&name) {
            name = format!("{name}-{fingerprint}");
        }
        used_names.insert(name.clone());

        let pascal = pascal_case(&name);
        let variants = self
            .group_variants(instances)
            .into_iter()
            .map(|(variant, members)| ComponentVariant {
                example_usage: format!("<{pascal} variant=\"{variant}\" />"),
                props: extract_props(members[0]),
                name: variant,
            })
            .collect();

        ComponentSpec {
            category: category.to_string(),
            description: format!("{name} - {}", component_type.description()),
            name,
            component_type,
            fingerprint,
            instance_count: instances.len(),
            props: extract_props(base),
            variants,
            children: extract_children(base),
            varying_properties: varying_properties(instances),
        }
    }

    pub fn summary(catalog: &ComponentCatalog) -> ComponentSummary {
        let mut summary = ComponentSummary {
            total_components: catalog.components.len(),
            ..Default::default()
        };
        for spec in &catalog.components {
            *summary.by_category.entry(spec.category.clone()).or_default() += 1;
            *summary
                .by_type
                .entry(spec.component_type.to_string())
                .or_default() += 1;
            if spec.variants.len() > 1 {
                summary.with_variants += 1;
            }
        }
        summary
    }
}

impl Analyzer for ComponentParser<'_> {
    type Output = ComponentCatalog;

    fn stage(&self) -> Stage {
        Stage::Components
    }

    fn analyze(&self, root: &DesignNode) -> Result<ComponentCatalog> {
        self.parse_all_components(root)
    }
}

/// A group holding a rectangle background next to text or an icon.
fn has_component_structure(node: &DesignNode) -> bool {
    if node.children.len() < 2 {
        return false;
    }
    let has_background = node
        .children
        .iter()
        .any(|c| c.node_type == NodeType::Rectangle);
    let has_text = node.children.iter().any(|c| c.node_type == NodeType::Text);
    let has_icon = node
        .children
        .iter()
        .any(|c| c.lowercase_name().contains("icon"));
    has_background && (has_text || has_icon)
}
