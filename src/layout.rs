//! Screen layout analysis and grid detection.
//!
//! A screen is any FRAME below the document root, or a CANVAS directly under
//! it. Screens whose size cannot be resolved are dropped. Each screen gets a
//! layout rule: auto-layout containers report their declared direction,
//! spacing and padding, everything else is classified as manual and its
//! direction and spacing are inferred from child geometry.

use std::collections::BTreeMap;

use crate::clustering::{count_grid_cells, find_common_values, find_regular_spacing};
use crate::components::ComponentParser;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::extractor::{Analyzer, Stage};
use crate::figma::{BoundingBox, DesignNode, NodeType, Paint};
use crate::normalize::round_to;
use crate::normalize::spacing::{dominant_axis, positive_gaps};
use crate::traversal::walk;
use crate::types::{
    ChildLayout, ChildStyle, ChildrenCounts, GridSystem, LayoutKind, LayoutPatterns, LayoutRule,
    LayoutSummary, Padding, Position, ScreenLayout, ScreenLayouts, ScreenSize, ScreenSizeSummary,
    Size,
};

fn is_screen(node: &DesignNode, depth: usize) -> bool {
    match node.node_type {
        NodeType::Frame => depth > 0,
        NodeType::Canvas => depth == 1,
        _ => false,
    }
}

fn solid_hexes<'n>(fills: Option<&'n Vec<Paint>>) -> impl Iterator<Item = String> + 'n {
    fills
        .into_iter()
        .flatten()
        .filter(|paint| paint.is_visible())
        .filter_map(Paint::solid_hex)
}

fn background_color(node: &DesignNode) -> Option<String> {
    solid_hexes(node.fills.as_ref()).next().or_else(|| {
        node.background_color
            .as_ref()
            .filter(|_| node.node_type == NodeType::Canvas)
            .map(|color| color.to_hex())
    })
}

/// Accumulates spacing observations while screens are analyzed.
#[derive(Debug, Default)]
struct SpacingPool {
    values: Vec<f64>,
}

impl SpacingPool {
    fn record(&mut self, value: f64) {
        if value > 0.0 && value.is_finite() {
            self.values.push(value);
        }
    }
}

/// Builds the `screen_layouts` artifact.
pub struct LayoutAnalyzer<'a> {
    config: &'a ExtractorConfig,
    components: ComponentParser<'a>,
}

impl<'a> LayoutAnalyzer<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        Self {
            config,
            components: ComponentParser::new(config),
        }
    }

    pub fn analyze_all_layouts(&self, root: &DesignNode) -> Result<ScreenLayouts> {
        let mut screens = Vec::new();
        let mut pool = SpacingPool::default();

        walk(root, Stage::Layouts, self.config.max_depth, |node, ctx| {
            if !is_screen(node, ctx.depth) {
                return Ok(());
            }
            match node.resolved_bounds() {
                Some(bounds) => screens.push(self.screen_layout(node, bounds, &mut pool)),
                None => tracing::debug!(screen = %node.name, "screen without size skipped"),
            }
            Ok(())
        })?;

        let grid_systems: Vec<GridSystem> = screens
            .iter()
            .filter_map(|screen| detect_grid(screen, self.config.layout.grid_tolerance))
            .collect();
        let layout_patterns = (!screens.is_empty() || !pool.values.is_empty())
            .then(|| self.layout_patterns(&screens, &pool));

        tracing::debug!(
            screens = screens.len(),
            grids = grid_systems.len(),
            spacing_observations = pool.values.len(),
            "layouts analyzed"
        );
        Ok(ScreenLayouts {
            screens,
            layout_patterns,
            grid_systems,
        })
    }

    fn screen_layout(&self, node: &DesignNode, bounds: BoundingBox, pool: &mut SpacingPool) -> ScreenLayout {
        let children = node
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| self.child_layout(child, index))
            .collect();

        let boxes: Vec<BoundingBox> = node
            .children
            .iter()
            .filter_map(DesignNode::resolved_bounds)
            .collect();
        let layout = match node.auto_layout_mode() {
            Some(mode) => auto_layout_rule(node, mode, pool),
            None => manual_layout_rule(&boxes, pool),
        };

        let node_type = node.node_type.as_str();
        ScreenLayout {
            name: node.name.clone(),
            node_type: node.node_type.lowercase(),
            size: ScreenSize {
                width: bounds.width,
                height: bounds.height,
                x: bounds.x,
                y: bounds.y,
            },
            background_color: background_color(node),
            children,
            layout,
            description: format!("{node_type} screen: {}", node.name),
        }
    }

    fn child_layout(&self, child: &DesignNode, index: usize) -> Option<ChildLayout> {
        let bounds = child.resolved_bounds()?;
        Some(ChildLayout {
            name: child.name.clone(),
            node_type: child.node_type.lowercase(),
            index,
            size: Size {
                width: bounds.width,
                height: bounds.height,
            },
            position: Position {
                x: bounds.x,
                y: bounds.y,
            },
            visible: child.is_visible(),
            style: ChildStyle {
                background_colors: child
                    .fills
                    .iter()
                    .flatten()
                    .filter_map(Paint::solid_hex)
                    .collect(),
                border_radius: child.corner_radius,
                opacity: child.opacity,
            },
            constraints: child.constraints.clone(),
            component_ref: self.components.component_ref(child),
        })
    }

    fn layout_patterns(&self, screens: &[ScreenLayout], pool: &SpacingPool) -> LayoutPatterns {
        let mut screen_sizes: Vec<Size> = Vec::new();
        for screen in screens {
            let size = Size {
                width: screen.size.width,
                height: screen.size.height,
            };
            if !screen_sizes.contains(&size) {
                screen_sizes.push(size);
            }
        }

        let mut layout_directions = BTreeMap::new();
        for direction in screens.iter().filter_map(|s| s.layout.direction.as_ref()) {
            *layout_directions.entry(direction.clone()).or_insert(0) += 1;
        }

        LayoutPatterns {
            common_spacing: find_common_values(
                &pool.values,
                self.config.layout.common_spacing_tolerance,
            ),
            screen_sizes,
            layout_directions,
        }
    }

    pub fn summary(layouts: &ScreenLayouts) -> LayoutSummary {
        let screens = &layouts.screens;
        if screens.is_empty() {
            return LayoutSummary::default();
        }

        let range = |values: Vec<f64>| -> Option<[f64; 2]> {
            let min = values.iter().copied().reduce(f64::min)?;
            let max = values.iter().copied().reduce(f64::max)?;
            Some([min, max])
        };
        let mut unique: Vec<(f64, f64)> = Vec::new();
        for screen in screens {
            let pair = (screen.size.width, screen.size.height);
            if !unique.contains(&pair) {
                unique.push(pair);
            }
        }

        let mut layout_types = BTreeMap::new();
        for screen in screens {
            *layout_types
                .entry(screen.layout.kind.as_str().to_string())
                .or_insert(0) += 1;
        }

        let counts: Vec<usize> = screens.iter().map(|s| s.children.len()).collect();
        let total: usize = counts.iter().sum();

        LayoutSummary {
            total_screens: screens.len(),
            screen_sizes: ScreenSizeSummary {
                width_range: range(screens.iter().map(|s| s.size.width).collect()),
                height_range: range(screens.iter().map(|s| s.size.height).collect()),
                unique_sizes: unique.len(),
            },
            layout_types,
            children_counts: ChildrenCounts {
                total,
                average: round_to(total as f64 / counts.len() as f64, 2),
                max: counts.iter().copied().max().unwrap_or(0),
            },
            spacing_patterns_found: layouts
                .layout_patterns
                .as_ref()
                .map_or(0, |p| p.common_spacing.len()),
            grid_systems_detected: layouts.grid_systems.len(),
        }
    }
}

impl Analyzer for LayoutAnalyzer<'_> {
    type Output = ScreenLayouts;

    fn stage(&self) -> Stage {
        Stage::Layouts
    }

    fn analyze(&self, root: &DesignNode) -> Result<ScreenLayouts> {
        self.analyze_all_layouts(root)
    }
}

fn auto_layout_rule(node: &DesignNode, mode: &str, pool: &mut SpacingPool) -> LayoutRule {
    if let Some(spacing) = node.item_spacing {
        pool.record(spacing);
    }
    let [left, right, top, bottom] = node.paddings();
    let padding = Padding {
        left,
        right,
        top,
        bottom,
    };
    let alignment = node
        .primary_axis_align_items
        .as_deref()
        .or(node.layout_align.as_deref())
        .unwrap_or("STRETCH")
        .to_lowercase();

    LayoutRule {
        kind: LayoutKind::AutoLayout,
        direction: Some(mode.to_lowercase()),
        spacing: node.item_spacing,
        padding: (padding != Padding::default()).then_some(padding),
        alignment: Some(alignment),
    }
}

fn manual_layout_rule(boxes: &[BoundingBox], pool: &mut SpacingPool) -> LayoutRule {
    let mut rule = LayoutRule::manual();
    if boxes.len() < 2 {
        return rule;
    }

    let axis = dominant_axis(boxes);
    let gaps = positive_gaps(boxes, axis);
    for gap in &gaps {
        pool.record(*gap);
    }
    if !gaps.is_empty() {
        rule.spacing = Some(round_to(gaps.iter().sum::<f64>() / gaps.len() as f64, 2));
    }

    let cross = axis.cross();
    let first = cross.start(&boxes[0]);
    if boxes.iter().all(|b| cross.start(b) == first) {
        rule.alignment = Some("center".to_string());
    }
    rule.direction = Some(axis.direction().to_string());
    rule
}

/// Regular child spacing on either axis, if any.
pub fn detect_grid(screen: &ScreenLayout, tolerance: f64) -> Option<GridSystem> {
    if screen.children.len() < 2 {
        return None;
    }
    let xs: Vec<f64> = screen.children.iter().map(|c| c.position.x).collect();
    let ys: Vec<f64> = screen.children.iter().map(|c| c.position.y).collect();

    let x_spacing = find_regular_spacing(&xs, tolerance);
    let y_spacing = find_regular_spacing(&ys, tolerance);
    if x_spacing.is_none() && y_spacing.is_none() {
        return None;
    }

    Some(GridSystem {
        screen: screen.name.clone(),
        x_spacing,
        y_spacing,
        columns: x_spacing.map(|step| count_grid_cells(&xs, step)),
        rows: y_spacing.map(|step| count_grid_cells(&ys, step)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::{FigmaColor, TypeStyle};

    fn color(hex: &str) -> Paint {
        Paint::solid(FigmaColor::from_hex(hex).unwrap())
    }

    fn login_screen() -> DesignNode {
        DesignNode::new(NodeType::Frame, "LoginScreen")
            .with_bounds(0.0, 0.0, 300.0, 500.0)
            .with_children(vec![
                DesignNode::new(NodeType::Rectangle, "bg")
                    .with_bounds(0.0, 0.0, 300.0, 500.0)
                    .with_fill(color("#ffffff")),
                DesignNode::new(NodeType::Rectangle, "button-primary")
                    .with_bounds(90.0, 400.0, 120.0, 40.0)
                    .with_corner_radius(8.0)
                    .with_fill(color("#6257db")),
                DesignNode::new(NodeType::Text, "Welcome")
                    .with_bounds(50.0, 50.0, 200.0, 30.0)
                    .with_text("Welcome", TypeStyle::new("Inter", 24.0, 700.0)),
            ])
    }

    fn doc(children: Vec<DesignNode>) -> DesignNode {
        DesignNode::new(NodeType::Document, "doc")
            .with_children(vec![DesignNode::new(NodeType::Canvas, "page").with_children(children)])
    }

    fn analyze(root: &DesignNode) -> ScreenLayouts {
        let config = ExtractorConfig::default();
        LayoutAnalyzer::new(&config).analyze_all_layouts(root).unwrap()
    }

    #[test]
    fn frames_below_the_root_become_screens() {
        let layouts = analyze(&doc(vec![login_screen()]));
        assert_eq!(layouts.screens.len(), 1);
        let screen = &layouts.screens[0];
        assert_eq!(screen.name, "LoginScreen");
        assert_eq!(screen.node_type, "frame");
        assert_eq!(screen.children.len(), 3);
        assert_eq!(screen.size.width, 300.0);
        assert_eq!(screen.description, "FRAME screen: LoginScreen");
        assert_eq!(screen.layout.kind, LayoutKind::Manual);
    }

    #[test]
    fn root_frame_is_not_a_screen() {
        let root = login_screen();
        let layouts = analyze(&root);
        assert!(layouts.screens.is_empty());
    }

    #[test]
    fn screens_without_size_are_dropped() {
        let layouts = analyze(&doc(vec![DesignNode::new(NodeType::Frame, "ghost")]));
        assert!(layouts.screens.is_empty());
        assert!(layouts.layout_patterns.is_none());
    }

    #[test]
    fn canvas_background_is_used_when_it_has_size() {
        let mut page = DesignNode::new(NodeType::Canvas, "page").with_bounds(0.0, 0.0, 1440.0, 900.0);
        page.background_color = Some(FigmaColor::rgb(0.0, 0.0, 0.0));
        let root = DesignNode::new(NodeType::Document, "doc").with_children(vec![page]);
        let layouts = analyze(&root);
        assert_eq!(layouts.screens[0].background_color.as_deref(), Some("#000000"));
        assert_eq!(layouts.screens[0].node_type, "canvas");
    }

    #[test]
    fn children_without_geometry_are_excluded() {
        let screen = DesignNode::new(NodeType::Frame, "s")
            .with_bounds(0.0, 0.0, 100.0, 100.0)
            .with_fill(color("#fafafa"))
            .with_children(vec![
                DesignNode::new(NodeType::Text, "floating"),
                DesignNode::new(NodeType::Rectangle, "box").with_bounds(0.0, 0.0, 10.0, 10.0),
            ]);
        let layouts = analyze(&doc(vec![screen]));
        let screen = &layouts.screens[0];
        assert_eq!(screen.background_color.as_deref(), Some("#fafafa"));
        assert_eq!(screen.children.len(), 1);
        assert_eq!(screen.children[0].index, 1);
        assert_eq!(screen.layout, LayoutRule::manual());
    }

    #[test]
    fn auto_layout_reports_declared_rule() {
        let mut list = DesignNode::new(NodeType::Frame, "list")
            .with_bounds(0.0, 0.0, 200.0, 400.0)
            .with_auto_layout("VERTICAL", 12.0, 16.0);
        list.primary_axis_align_items = Some("CENTER".into());
        let layouts = analyze(&doc(vec![list]));
        let rule = &layouts.screens[0].layout;
        assert_eq!(rule.kind, LayoutKind::AutoLayout);
        assert_eq!(rule.direction.as_deref(), Some("vertical"));
        assert_eq!(rule.spacing, Some(12.0));
        assert_eq!(rule.alignment.as_deref(), Some("center"));
        assert_eq!(rule.padding.map(|p| p.top), Some(Some(16.0)));
    }

    #[test]
    fn layout_mode_none_is_manual() {
        let mut frame = DesignNode::new(NodeType::Frame, "f").with_bounds(0.0, 0.0, 10.0, 10.0);
        frame.layout_mode = Some("NONE".into());
        let layouts = analyze(&doc(vec![frame]));
        assert_eq!(layouts.screens[0].layout.kind, LayoutKind::Manual);
    }

    #[test]
    fn manual_layout_infers_direction_spacing_and_alignment() {
        let row = DesignNode::new(NodeType::Frame, "row")
            .with_bounds(0.0, 0.0, 400.0, 50.0)
            .with_children(vec![
                DesignNode::new(NodeType::Rectangle, "a").with_bounds(0.0, 10.0, 50.0, 30.0),
                DesignNode::new(NodeType::Rectangle, "b").with_bounds(70.0, 10.0, 50.0, 30.0),
                DesignNode::new(NodeType::Rectangle, "c").with_bounds(150.0, 10.0, 50.0, 30.0),
            ]);
        let layouts = analyze(&doc(vec![row]));
        let rule = &layouts.screens[0].layout;
        assert_eq!(rule.direction.as_deref(), Some("horizontal"));
        assert_eq!(rule.spacing, Some(25.0));
        assert_eq!(rule.alignment.as_deref(), Some("center"));

        let patterns = layouts.layout_patterns.unwrap();
        assert!(patterns.common_spacing.is_empty());
        assert_eq!(patterns.layout_directions.get("horizontal"), Some(&1));
    }

    #[test]
    fn equal_spread_counts_as_vertical() {
        let rule = manual_layout_rule(
            &[
                BoundingBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
                BoundingBox { x: 20.0, y: 20.0, width: 10.0, height: 10.0 },
            ],
            &mut SpacingPool::default(),
        );
        assert_eq!(rule.direction.as_deref(), Some("vertical"));
        assert_eq!(rule.spacing, Some(10.0));
        assert_eq!(rule.alignment, None);
    }

    #[test]
    fn evenly_spaced_children_form_a_grid() {
        let cells = (0..4)
            .map(|i| {
                DesignNode::new(NodeType::Rectangle, format!("cell {i}"))
                    .with_bounds(i as f64 * 100.0, 0.0, 80.0, 80.0)
            })
            .collect();
        let screen = DesignNode::new(NodeType::Frame, "gallery")
            .with_bounds(0.0, 0.0, 400.0, 100.0)
            .with_children(cells);
        let layouts = analyze(&doc(vec![screen]));
        let grid = &layouts.grid_systems[0];
        assert_eq!(grid.screen, "gallery");
        assert_eq!(grid.x_spacing, Some(100.0));
        assert_eq!(grid.columns, Some(4));
        assert_eq!(grid.y_spacing, None);
        assert_eq!(grid.rows, None);
    }

    #[test]
    fn irregular_children_form_no_grid() {
        let screen = DesignNode::new(NodeType::Frame, "scatter")
            .with_bounds(0.0, 0.0, 400.0, 400.0)
            .with_children(vec![
                DesignNode::new(NodeType::Rectangle, "a").with_bounds(0.0, 0.0, 10.0, 10.0),
                DesignNode::new(NodeType::Rectangle, "b").with_bounds(37.0, 91.0, 10.0, 10.0),
                DesignNode::new(NodeType::Rectangle, "c").with_bounds(141.0, 113.0, 10.0, 10.0),
                DesignNode::new(NodeType::Rectangle, "d").with_bounds(150.0, 290.0, 10.0, 10.0),
            ]);
        let layouts = analyze(&doc(vec![screen]));
        assert!(layouts.grid_systems.is_empty());
    }

    #[test]
    fn component_children_carry_their_fingerprint() {
        let config = ExtractorConfig::default();
        let analyzer = LayoutAnalyzer::new(&config);
        let layouts = analyzer.analyze_all_layouts(&doc(vec![login_screen()])).unwrap();
        let children = &layouts.screens[0].children;
        let button = children.iter().find(|c| c.name == "button-primary").unwrap();
        let expected = ComponentParser::new(&config).fingerprint(&login_screen().children[1]);
        assert_eq!(button.component_ref.as_deref(), Some(expected.as_str()));
        let text = children.iter().find(|c| c.name == "Welcome").unwrap();
        assert_eq!(text.component_ref, None);
    }

    #[test]
    fn patterns_and_summary_aggregate_screens() {
        let make = |name: &str, spacing: f64| {
            DesignNode::new(NodeType::Frame, name)
                .with_bounds(0.0, 0.0, 375.0, 812.0)
                .with_auto_layout("VERTICAL", spacing, 0.0)
        };
        let wide = DesignNode::new(NodeType::Frame, "desktop").with_bounds(0.0, 0.0, 1440.0, 900.0);
        let layouts = analyze(&doc(vec![make("a", 16.0), make("b", 17.0), wide]));

        let patterns = layouts.layout_patterns.as_ref().unwrap();
        assert_eq!(patterns.common_spacing, vec![16.5]);
        assert_eq!(patterns.screen_sizes.len(), 2);
        assert_eq!(patterns.screen_sizes[0], Size { width: 375.0, height: 812.0 });
        assert_eq!(patterns.layout_directions.get("vertical"), Some(&2));

        let summary = LayoutAnalyzer::summary(&layouts);
        assert_eq!(summary.total_screens, 3);
        assert_eq!(summary.screen_sizes.width_range, Some([375.0, 1440.0]));
        assert_eq!(summary.screen_sizes.unique_sizes, 2);
        assert_eq!(summary.layout_types.get("auto-layout"), Some(&2));
        assert_eq!(summary.layout_types.get("manual"), Some(&1));
        assert_eq!(summary.children_counts.total, 0);
        assert_eq!(summary.spacing_patterns_found, 1);
    }
}
