use dae_lib::{ExtractError, OutputKind, Stage};

#[test]
fn config_error_display_includes_message() {
    let err = ExtractError::Config("max_depth must be at least 1".to_string());

    assert_eq!(
        format!("{}", err),
        "Configuration error: max_depth must be at least 1"
    );
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: ExtractError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn stage_helper_names_the_stage() {
    let err = ExtractError::stage(Stage::Components, "fingerprint collision");

    assert_eq!(
        format!("{}", err),
        "component parsing failed: fingerprint collision"
    );
}

#[test]
fn depth_limit_names_node_and_limit() {
    let err = ExtractError::DepthLimit {
        stage: Stage::Tokens,
        limit: 3,
        node: "Inner".to_string(),
    };

    assert_eq!(
        format!("{}", err),
        "design token extraction exceeded the maximum tree depth of 3 at node 'Inner'"
    );
}

#[test]
fn invalid_document_helper_uses_message() {
    let err = ExtractError::invalid_document("no `document` key found");

    assert_eq!(
        format!("{}", err),
        "Invalid document: no `document` key found"
    );
}

#[test]
fn validation_error_names_the_artifact() {
    let err = ExtractError::Validation {
        kind: OutputKind::ScreenLayouts,
        missing: vec!["screens".to_string()],
    };

    assert_eq!(
        format!("{}", err),
        "Output validation failed for screen_layouts: missing screens"
    );
}
