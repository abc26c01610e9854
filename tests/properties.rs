use std::collections::BTreeSet;

use dae_lib::figma::{FigmaColor, Paint};
use dae_lib::{
    ComponentParser, DesignAssetExtractor, DesignNode, ExtractorConfig, FigmaFile, LayoutAnalyzer,
    NodeType, TokenExtractor,
};
use proptest::prelude::*;

fn hex_color() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
}

fn swatch(index: usize, hex: &str) -> DesignNode {
    DesignNode::new(NodeType::Rectangle, format!("swatch {index}"))
        .with_bounds(index as f64 * 50.0, 0.0, 40.0, 40.0)
        .with_fill(Paint::solid(FigmaColor::from_hex(hex).unwrap()))
}

fn document(children: Vec<DesignNode>) -> DesignNode {
    DesignNode::new(NodeType::Document, "Document").with_children(vec![
        DesignNode::new(NodeType::Canvas, "Page").with_children(children),
    ])
}

fn screen_tree() -> impl Strategy<Value = DesignNode> {
    let child = (0.0f64..400.0, 0.0f64..800.0, 1.0f64..200.0, 1.0f64..200.0, hex_color(), 0usize..4)
        .prop_map(|(x, y, w, h, hex, kind)| {
            let (node_type, name) = match kind {
                0 => (NodeType::Rectangle, "card"),
                1 => (NodeType::Instance, "Button Primary"),
                2 => (NodeType::Text, "label"),
                _ => (NodeType::Rectangle, "shape"),
            };
            DesignNode::new(node_type, name)
                .with_bounds(x, y, w, h)
                .with_fill(Paint::solid(FigmaColor::from_hex(&hex).unwrap()))
        });
    prop::collection::vec(child, 0..12).prop_map(|children| {
        document(vec![DesignNode::new(NodeType::Frame, "Screen")
            .with_bounds(0.0, 0.0, 400.0, 800.0)
            .with_children(children)])
    })
}

proptest! {
    #[test]
    fn extraction_is_deterministic(root in screen_tree()) {
        let file = FigmaFile::from_document(root);
        let extractor = DesignAssetExtractor::new(ExtractorConfig::default());
        let first = extractor.extract_all_assets(&file).unwrap();
        let second = extractor.extract_all_assets(&file).unwrap();
        prop_assert_eq!(first.design_tokens, second.design_tokens);
        prop_assert_eq!(first.component_catalog, second.component_catalog);
        prop_assert_eq!(first.screen_layouts, second.screen_layouts);
    }

    #[test]
    fn colors_partition_every_observed_hex(hexes in prop::collection::vec(hex_color(), 0..24)) {
        let config = ExtractorConfig::default();
        let nodes: Vec<DesignNode> = hexes.iter().enumerate().map(|(i, h)| swatch(i, h)).collect();
        let colors = TokenExtractor::new(&config)
            .extract_all_tokens(&document(nodes))
            .unwrap()
            .colors;

        let observed: BTreeSet<&str> = hexes.iter().map(String::as_str).collect();
        let emitted: Vec<&str> = colors.all_values().collect();
        let emitted_set: BTreeSet<&str> = emitted.iter().copied().collect();
        prop_assert_eq!(emitted.len(), emitted_set.len());
        prop_assert_eq!(emitted_set, observed);
    }

    #[test]
    fn color_categories_ignore_document_order(hexes in prop::collection::vec(hex_color(), 1..16)) {
        let config = ExtractorConfig::default();
        let extractor = TokenExtractor::new(&config);
        let forward: Vec<DesignNode> = hexes.iter().enumerate().map(|(i, h)| swatch(i, h)).collect();
        let backward: Vec<DesignNode> =
            hexes.iter().rev().enumerate().map(|(i, h)| swatch(i, h)).collect();
        let a = extractor.extract_all_tokens(&document(forward)).unwrap().colors;
        let b = extractor.extract_all_tokens(&document(backward)).unwrap().colors;
        prop_assert_eq!(a, b);
    }

    #[test]
    fn spacing_scale_is_total(values in prop::collection::vec(0.0f64..200.0, 0..20)) {
        let config = ExtractorConfig::default();
        let nodes: Vec<DesignNode> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                DesignNode::new(NodeType::Frame, format!("stack {i}"))
                    .with_auto_layout("VERTICAL", *v, 0.0)
            })
            .collect();
        let spacing = TokenExtractor::new(&config)
            .extract_all_tokens(&document(nodes))
            .unwrap()
            .spacing;
        let names: Vec<&str> = spacing.iter().map(|(name, _)| name).collect();
        let expected: Vec<&str> = config.spacing.steps.iter().map(|(name, _)| name.as_str()).collect();
        prop_assert_eq!(names, expected);
        prop_assert!(spacing.iter().all(|(_, v)| v > 0.0));
    }

    #[test]
    fn fingerprints_track_their_inputs(
        width in 1u32..400,
        height in 1u32..400,
        radius in 0u32..32,
        hex in hex_color(),
    ) {
        let config = ExtractorConfig::default();
        let parser = ComponentParser::new(&config);
        let node = |w: u32, r: u32, node_type: NodeType| {
            let mut n = DesignNode::new(node_type, "Button")
                .with_bounds(10.0, 20.0, w as f64, height as f64)
                .with_fill(Paint::solid(FigmaColor::from_hex(&hex).unwrap()));
            if r > 0 {
                n = n.with_corner_radius(r as f64);
            }
            n
        };

        let base = parser.fingerprint(&node(width, radius, NodeType::Rectangle));
        prop_assert_eq!(base.len(), 8);
        prop_assert!(base.chars().all(|c| c.is_ascii_hexdigit()));
        prop_assert_eq!(&base, &parser.fingerprint(&node(width, radius, NodeType::Rectangle)));
        prop_assert_ne!(&base, &parser.fingerprint(&node(width + 1, radius, NodeType::Rectangle)));
        prop_assert_ne!(&base, &parser.fingerprint(&node(width, radius + 1, NodeType::Rectangle)));
        prop_assert_ne!(&base, &parser.fingerprint(&node(width, radius, NodeType::Instance)));
    }

    #[test]
    fn rectangles_qualify_on_any_single_trait(
        width in 1.0f64..1200.0,
        height in 1.0f64..1200.0,
        radius in prop::option::of(1.0f64..32.0),
        filled in any::<bool>(),
    ) {
        let config = ExtractorConfig::default();
        let parser = ComponentParser::new(&config);
        let mut node = DesignNode::new(NodeType::Rectangle, "shape").with_bounds(0.0, 0.0, width, height);
        if let Some(r) = radius {
            node = node.with_corner_radius(r);
        }
        if filled {
            node = node.with_fill(Paint::solid(FigmaColor::from_hex("#336699").unwrap()));
        }

        let window = config.components.min_size..=config.components.max_size;
        let sized = window.contains(&width) && window.contains(&height);
        prop_assert_eq!(parser.qualifies(&node), radius.is_some() || filled || sized);
    }

    #[test]
    fn frames_below_the_root_are_screens_exactly_once(
        sized in prop::collection::vec(any::<bool>(), 0..10)
    ) {
        let config = ExtractorConfig::default();
        let frames: Vec<DesignNode> = sized
            .iter()
            .enumerate()
            .map(|(i, has_size)| {
                let frame = DesignNode::new(NodeType::Frame, format!("Screen {i}"));
                if *has_size {
                    frame.with_bounds(i as f64 * 400.0, 0.0, 375.0, 812.0)
                } else {
                    frame
                }
            })
            .collect();
        let root = DesignNode::new(NodeType::Frame, "Root").with_children(frames);
        let layouts = LayoutAnalyzer::new(&config).analyze_all_layouts(&root).unwrap();

        let expected: Vec<String> = sized
            .iter()
            .enumerate()
            .filter(|(_, has_size)| **has_size)
            .map(|(i, _)| format!("Screen {i}"))
            .collect();
        let names: Vec<String> = layouts.screens.iter().map(|s| s.name.clone()).collect();
        prop_assert_eq!(names, expected);
    }
}
