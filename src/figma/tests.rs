//! Tests for Figma document parsing and envelope handling.

#[cfg(test)]
mod tests {
    use crate::config::ExtractorConfig;
    use crate::error::ExtractError;
    use crate::figma::api_types::{
        Dimension, EffectType, FigmaColor, FontWeightValue, NodeType, PaintType,
    };
    use crate::figma::{load_figma_file, parse_figma_file};
    use crate::tokens::TokenExtractor;
    use serde_json::json;
    use tempfile::TempDir;

    fn files_response() -> serde_json::Value {
        json!({
            "name": "Mobile App",
            "lastModified": "2024-03-01T10:00:00Z",
            "version": "1234",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "name": "Page 1",
                    "type": "CANVAS",
                    "backgroundColor": {"r": 0.9, "g": 0.9, "b": 0.9, "a": 1},
                    "children": [{
                        "id": "1:2",
                        "name": "LoginScreen",
                        "type": "FRAME",
                        "absoluteBoundingBox": {"x": 0, "y": 0, "width": 300, "height": 500},
                        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
                        "children": []
                    }]
                }]
            },
            "components": {},
            "styles": {}
        })
    }

    #[test]
    fn test_figma_color_to_hex() {
        let color = FigmaColor {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(color.to_hex(), "#ff8000");
    }

    #[test]
    fn test_figma_color_hex_roundtrip() {
        let color = FigmaColor::from_hex("#6257db").unwrap();
        assert_eq!(color.to_hex(), "#6257db");
        assert!(FigmaColor::from_hex("not a color").is_none());
    }

    #[test]
    fn parses_files_response() {
        let file = parse_figma_file(&files_response().to_string()).unwrap();
        assert_eq!(file.name.as_deref(), Some("Mobile App"));
        assert_eq!(file.version.as_deref(), Some("1234"));
        assert_eq!(file.document.node_type, NodeType::Document);
        let page = &file.document.children[0];
        assert_eq!(page.node_type, NodeType::Canvas);
        assert_eq!(page.background_color.map(|c| c.to_hex()), Some("#e6e6e6".to_string()));
        let frame = &page.children[0];
        assert_eq!(frame.absolute_bounding_box.map(|b| b.width), Some(300.0));
        assert_eq!(frame.fills.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn unwraps_cache_entries() {
        let entry = json!({
            "data": files_response(),
            "timestamp": 1_700_000_000.0,
            "ttl": 3600
        });
        let file = parse_figma_file(&entry.to_string()).unwrap();
        assert_eq!(file.name.as_deref(), Some("Mobile App"));
        assert_eq!(file.document.children.len(), 1);
    }

    #[test]
    fn wraps_nodes_responses_in_a_document() {
        let response = json!({
            "name": "Mobile App",
            "version": 77,
            "nodes": {
                "2:5": {"document": {"name": "Second", "type": "FRAME"}},
                "1:2": {"document": {"name": "First", "type": "FRAME"}},
                "9:9": null
            }
        });
        let file = parse_figma_file(&response.to_string()).unwrap();
        assert_eq!(file.document.node_type, NodeType::Document);
        assert_eq!(file.document.children.len(), 1);
        assert_eq!(file.document.children[0].name, "First");
        assert_eq!(file.version.as_deref(), Some("77"));
    }

    #[test]
    fn rejects_unknown_envelopes() {
        for input in [json!([1, 2, 3]), json!({"nodes": {}}), json!({"data": {"x": 1}}), json!({})] {
            let err = parse_figma_file(&input.to_string()).unwrap_err();
            assert!(matches!(err, ExtractError::InvalidDocument(_)), "{input}: {err:?}");
        }
        assert!(matches!(
            parse_figma_file("{not json").unwrap_err(),
            ExtractError::Serialization(_)
        ));
    }

    #[test]
    fn malformed_fields_are_dropped_not_fatal() {
        let input = json!({
            "document": {
                "type": "DOCUMENT",
                "children": [{
                    "type": "RECTANGLE",
                    "name": "broken",
                    "absoluteBoundingBox": "nowhere",
                    "cornerRadius": "big",
                    "fills": [
                        {"type": "SOLID", "color": "red"},
                        {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}},
                        42
                    ],
                    "strokes": {"type": "SOLID"},
                    "children": [{"type": "WIDGET", "name": "custom"}]
                }]
            }
        });
        let file = parse_figma_file(&input.to_string()).unwrap();
        let rect = &file.document.children[0];
        assert!(rect.absolute_bounding_box.is_none());
        assert!(rect.corner_radius.is_none());
        assert!(rect.strokes.is_none());
        let fills = rect.fills.as_ref().unwrap();
        assert_eq!(fills.len(), 2);
        assert!(fills[0].color.is_none());
        assert_eq!(fills[1].solid_hex().as_deref(), Some("#000000"));
        assert_eq!(rect.children[0].node_type, NodeType::Other("WIDGET".to_string()));
    }

    #[test]
    fn mistyped_identity_fields_keep_the_subtree() {
        let input = json!({
            "document": {
                "type": "DOCUMENT",
                "children": [{
                    "type": "CANVAS",
                    "name": "Page",
                    "children": [
                        {
                            "id": 17,
                            "type": "FRAME",
                            "name": 42,
                            "children": [{
                                "type": "RECTANGLE",
                                "name": "swatch",
                                "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}}]
                            }]
                        },
                        {"type": 5, "name": "odd", "children": [{"type": "TEXT", "name": "inner"}]},
                        "not a node",
                        null
                    ]
                }]
            }
        });
        let file = parse_figma_file(&input.to_string()).unwrap();
        let canvas = &file.document.children[0];
        assert_eq!(canvas.children.len(), 2);

        let frame = &canvas.children[0];
        assert_eq!(frame.node_type, NodeType::Frame);
        assert_eq!(frame.name, "");
        assert_eq!(frame.id, "");
        assert_eq!(frame.children[0].name, "swatch");

        let odd = &canvas.children[1];
        assert_eq!(odd.node_type, NodeType::default());
        assert_eq!(odd.children[0].node_type, NodeType::Text);

        let config = ExtractorConfig::default();
        let colors = TokenExtractor::new(&config)
            .extract_all_tokens(&file.document)
            .unwrap()
            .colors;
        let observed: Vec<&str> = colors.all_values().collect();
        assert_eq!(observed, vec!["#ff0000"]);
    }

    #[test]
    fn children_that_are_not_a_list_are_ignored() {
        let input = json!({
            "document": {
                "type": "DOCUMENT",
                "children": [{"type": "FRAME", "name": "a", "children": {"type": "TEXT"}}]
            }
        });
        let file = parse_figma_file(&input.to_string()).unwrap();
        assert_eq!(file.document.children[0].name, "a");
        assert!(file.document.children[0].children.is_empty());
    }

    #[test]
    fn text_style_variants_parse() {
        let input = json!({
            "document": {
                "type": "DOCUMENT",
                "children": [
                    {
                        "type": "TEXT",
                        "characters": "Hi",
                        "style": {
                            "fontFamily": "Inter",
                            "fontSize": 16,
                            "fontWeight": "semibold",
                            "lineHeight": {"value": 150, "unit": "PERCENT"},
                            "letterSpacing": 0.5
                        }
                    },
                    {
                        "type": "TEXT",
                        "style": {"fontSize": 12, "fontWeight": 400, "lineHeightPx": 18}
                    }
                ]
            }
        });
        let file = parse_figma_file(&input.to_string()).unwrap();
        let first = file.document.children[0].style.as_ref().unwrap();
        assert_eq!(
            first.font_weight,
            Some(FontWeightValue::Keyword("semibold".to_string()))
        );
        assert_eq!(
            first.line_height,
            Some(Dimension::WithUnit {
                value: 150.0,
                unit: Some("PERCENT".to_string())
            })
        );
        assert_eq!(first.letter_spacing, Some(Dimension::Value(0.5)));
        let second = file.document.children[1].style.as_ref().unwrap();
        assert_eq!(second.font_weight, Some(FontWeightValue::Numeric(400.0)));
        assert_eq!(second.line_height_px, Some(18.0));
    }

    #[test]
    fn paints_and_effects_parse() {
        let input = json!({
            "document": {
                "type": "DOCUMENT",
                "fills": [{
                    "type": "GRADIENT_LINEAR",
                    "gradientStops": [
                        {"color": {"r": 1, "g": 0, "b": 0, "a": 1}, "position": 0},
                        {"color": {"r": 0, "g": 0, "b": 1, "a": 1}, "position": 1}
                    ]
                }],
                "effects": [
                    {"type": "DROP_SHADOW", "radius": 4, "offset": {"x": 0, "y": 2},
                     "color": {"r": 0, "g": 0, "b": 0, "a": 0.25}},
                    {"type": "BACKGROUND_BLUR", "radius": 8, "visible": false}
                ]
            }
        });
        let file = parse_figma_file(&input.to_string()).unwrap();
        let fill = &file.document.fills.as_ref().unwrap()[0];
        assert_eq!(fill.paint_type, PaintType::GradientLinear);
        assert!(fill.paint_type.is_gradient());
        assert_eq!(fill.gradient_stops.len(), 2);
        assert!(fill.solid_hex().is_none());

        let effects = file.document.effects.as_ref().unwrap();
        assert_eq!(effects[0].effect_type, EffectType::DropShadow);
        assert_eq!(effects[0].offset.map(|o| o.y), Some(2.0));
        assert_eq!(effects[1].effect_type, EffectType::BackgroundBlur);
        assert_eq!(effects[1].visible, Some(false));
    }

    #[test]
    fn resolved_bounds_fall_back_to_size() {
        let input = json!({
            "document": {
                "type": "DOCUMENT",
                "children": [
                    {"type": "FRAME", "absoluteRenderBounds": {"x": 5, "y": 5, "width": 10, "height": 20}},
                    {"type": "FRAME", "size": {"x": 375, "y": 812}},
                    {"type": "FRAME", "size": {"x": 0, "y": 812}}
                ]
            }
        });
        let file = parse_figma_file(&input.to_string()).unwrap();
        let bounds: Vec<_> = file
            .document
            .children
            .iter()
            .map(|c| c.resolved_bounds().map(|b| (b.x, b.width)))
            .collect();
        assert_eq!(bounds, vec![Some((5.0, 10.0)), Some((0.0, 375.0)), None]);
    }

    #[test]
    fn loads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, files_response().to_string()).unwrap();
        let file = load_figma_file(&path).unwrap();
        assert_eq!(file.document.children[0].children[0].name, "LoginScreen");

        let missing = load_figma_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ExtractError::Io(_)));
    }
}
