//! Design Asset Extractor (DAE) Library
//!
//! Derives design-system assets from a Figma document tree: a design-token set
//! (colors, typography, spacing, effects), a component catalog (recurring
//! patterns grouped into components with variants) and a screen-layout model
//! (screens, child placement, auto-layout or inferred manual layout, grids).
//!
//! # Module Overview
//!
//! - [`figma`] - Figma JSON types and envelope-aware loading
//! - [`traversal`] - Depth-limited pre-order walk shared by every analyzer
//! - [`normalize`] - Color, typography, spacing and effect normalizers
//! - [`clustering`] - Tolerance clustering for grids and common spacing
//! - [`tokens`] - Design token extraction
//! - [`components`] - Component identification and variant grouping
//! - [`layout`] - Screen layout analysis and grid detection
//! - [`extractor`] - Runs the analyzers and assembles the combined output
//! - [`config`] - Heuristic tables and tolerances, loadable from TOML
//! - [`types`] - Output data structures
//! - [`output`] - Run metadata, validation, reports and file output
//!
//! # Example
//!
//! ```no_run
//! use dae_lib::{load_figma_file, DesignAssetExtractor, ExtractorConfig};
//! use std::path::Path;
//!
//! # fn example() -> dae_lib::Result<()> {
//! let file = load_figma_file(Path::new("figma_file.json"))?;
//! let extractor = DesignAssetExtractor::new(ExtractorConfig::default());
//! match extractor.extract_all_assets(&file) {
//!     Ok(assets) => println!("{} components", assets.component_catalog.components.len()),
//!     Err(failed) => eprintln!("{}", failed.error),
//! }
//! # Ok(())
//! # }
//! ```

pub mod clustering;
pub mod components;
pub mod config;
pub mod error;
pub mod extractor;
pub mod figma;
pub mod layout;
pub mod normalize;
pub mod output;
pub mod tokens;
pub mod traversal;
pub mod types;

pub use components::ComponentParser;
pub use config::{ConfigError, ExtractorConfig};
pub use error::{ErrorCategory, ErrorPayload, ExtractError, Result};
pub use extractor::{run_stage, Analyzer, DesignAssetExtractor, FailedRun, Stage};
pub use figma::{load_figma_file, parse_figma_file, DesignNode, FigmaFile, NodeType};
pub use layout::LayoutAnalyzer;
pub use output::{
    extraction_report, validate_output, validate_outputs, write_json, write_outputs, AllAssets,
    ArtifactCheck, ErrorOutput, ExtractionMetadata, ExtractionSummary, FigmaFileInfo, OutputKind,
    RunStatus, ValidateOutput, ValidationReport, DAE_OUTPUT_VERSION,
};
pub use tokens::TokenExtractor;
pub use types::{
    ComponentCatalog, ComponentSpec, ComponentType, DesignTokens, ScreenLayout, ScreenLayouts,
};
