//! Orchestration of the three analyzers over one document.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::components::ComponentParser;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::figma::{DesignNode, FigmaFile};
use crate::layout::LayoutAnalyzer;
use crate::output::{AllAssets, ExtractionMetadata, ExtractionSummary, FigmaFileInfo};
use crate::tokens::TokenExtractor;
use crate::types::{ComponentCatalog, DesignTokens, ScreenLayouts};

/// The analyzer pass an error or log event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Tokens,
    Components,
    Layouts,
}

impl Stage {
    pub const fn all() -> [Stage; 3] {
        [Stage::Tokens, Stage::Components, Stage::Layouts]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Stage::Tokens => "design token extraction",
                Stage::Components => "component parsing",
                Stage::Layouts => "layout analysis",
            }
        )
    }
}

/// One pass over the design tree producing one artifact.
///
/// Implementations keep no state between calls; every `analyze` builds its
/// own accumulators, so an analyzer can be reused across documents.
pub trait Analyzer {
    type Output;

    fn stage(&self) -> Stage;

    fn analyze(&self, root: &DesignNode) -> Result<Self::Output>;
}

/// Run one analyzer, tagging any untagged failure with its stage.
pub fn run_stage<A: Analyzer>(analyzer: &A, root: &DesignNode) -> Result<A::Output> {
    let stage = analyzer.stage();
    let started = Instant::now();
    let output = analyzer.analyze(root).map_err(|err| match err.failed_stage() {
        Some(_) => err,
        None => ExtractError::stage(stage, err.to_string()),
    })?;
    tracing::debug!(%stage, elapsed_ms = started.elapsed().as_millis() as u64, "stage finished");
    Ok(output)
}

/// A run that stopped at a stage failure. Nothing computed before the
/// failure is kept; only the run metadata survives.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct FailedRun {
    pub metadata: ExtractionMetadata,
    #[source]
    pub error: ExtractError,
}

/// Runs token extraction, component parsing and layout analysis over a
/// document and merges the results.
#[derive(Debug, Clone, Default)]
pub struct DesignAssetExtractor {
    config: ExtractorConfig,
}

impl DesignAssetExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn extract_all_assets(&self, file: &FigmaFile) -> std::result::Result<AllAssets, FailedRun> {
        let start_time = Utc::now();
        let clock = Instant::now();
        let figma_file = FigmaFileInfo::from(file);
        tracing::info!(file = %figma_file.name, "extraction started");

        match self.run(&file.document) {
            Ok((design_tokens, component_catalog, screen_layouts)) => {
                let summary = ExtractionSummary {
                    design_tokens: TokenExtractor::summary(&design_tokens),
                    components: ComponentParser::summary(&component_catalog),
                    layouts: LayoutAnalyzer::summary(&screen_layouts),
                };
                let metadata = ExtractionMetadata::completed(
                    start_time,
                    Utc::now(),
                    clock.elapsed(),
                    figma_file,
                    summary,
                );
                tracing::info!(
                    duration_seconds = metadata.duration_seconds,
                    components = component_catalog.components.len(),
                    screens = screen_layouts.screens.len(),
                    "extraction completed"
                );
                Ok(AllAssets::new(
                    metadata,
                    design_tokens,
                    component_catalog,
                    screen_layouts,
                ))
            }
            Err(error) => {
                tracing::error!(%error, "extraction failed");
                let metadata = ExtractionMetadata::failed(
                    start_time,
                    Utc::now(),
                    clock.elapsed(),
                    figma_file,
                    &error,
                );
                Err(FailedRun { metadata, error })
            }
        }
    }

    fn run(&self, root: &DesignNode) -> Result<(DesignTokens, ComponentCatalog, ScreenLayouts)> {
        let tokens = run_stage(&TokenExtractor::new(&self.config), root)?;
        let components = run_stage(&ComponentParser::new(&self.config), root)?;
        let layouts = run_stage(&LayoutAnalyzer::new(&self.config), root)?;
        Ok((tokens, components, layouts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::NodeType;
    use crate::output::RunStatus;

    struct Failing;

    impl Analyzer for Failing {
        type Output = ();

        fn stage(&self) -> Stage {
            Stage::Components
        }

        fn analyze(&self, _root: &DesignNode) -> Result<()> {
            Err(ExtractError::invalid_document("node without type"))
        }
    }

    fn nested(depth: usize) -> DesignNode {
        let mut node = DesignNode::new(NodeType::Frame, "leaf");
        for i in 0..depth {
            node = DesignNode::new(NodeType::Frame, format!("level {i}")).with_children(vec![node]);
        }
        DesignNode::new(NodeType::Document, "doc").with_children(vec![node])
    }

    #[test]
    fn stage_names_are_human_readable() {
        assert_eq!(Stage::Tokens.to_string(), "design token extraction");
        assert_eq!(Stage::Layouts.to_string(), "layout analysis");
        assert_eq!(Stage::all().len(), 3);
    }

    #[test]
    fn untagged_failures_get_their_stage() {
        let root = DesignNode::new(NodeType::Document, "doc");
        let err = run_stage(&Failing, &root).unwrap_err();
        assert_eq!(err.failed_stage(), Some(Stage::Components));
        assert!(err.to_string().contains("node without type"));
    }

    #[test]
    fn empty_document_completes() {
        let file = FigmaFile::from_document(DesignNode::new(NodeType::Document, "doc"));
        let assets = DesignAssetExtractor::default()
            .extract_all_assets(&file)
            .unwrap();
        assert_eq!(assets.metadata.status, RunStatus::Completed);
        assert!(assets.metadata.error.is_none());
        assert!(assets.component_catalog.components.is_empty());
        assert!(assets.screen_layouts.screens.is_empty());
        assert!(assets.metadata.end_time >= assets.metadata.start_time);
    }

    #[test]
    fn stage_failure_discards_results() {
        let config = ExtractorConfig {
            max_depth: 3,
            ..ExtractorConfig::default()
        };
        let file = FigmaFile::from_document(nested(6));
        let failed = DesignAssetExtractor::new(config)
            .extract_all_assets(&file)
            .unwrap_err();
        assert_eq!(failed.metadata.status, RunStatus::Error);
        assert!(failed.metadata.summary.is_none());
        assert_eq!(failed.error.failed_stage(), Some(Stage::Tokens));
        let message = failed.metadata.error.as_deref().unwrap();
        assert!(message.contains("design token extraction"), "{message}");
    }
}
