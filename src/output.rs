use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ErrorPayload, ExtractError, Result};
use crate::figma::FigmaFile;
use crate::normalize::round_to;
use crate::types::{
    ComponentCatalog, ComponentSummary, DesignTokens, LayoutSummary, ScreenLayouts, TokenSummary,
};

/// Schema version for output payloads.
pub const DAE_OUTPUT_VERSION: &str = "0.1.0";

/// File name of the run metadata written next to the artifacts.
pub const METADATA_FILE: &str = "extraction_metadata.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    DesignTokens,
    ComponentCatalog,
    ScreenLayouts,
    AllAssets,
}

impl OutputKind {
    /// The three per-analyzer artifacts.
    pub const fn artifacts() -> [OutputKind; 3] {
        [
            OutputKind::DesignTokens,
            OutputKind::ComponentCatalog,
            OutputKind::ScreenLayouts,
        ]
    }

    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }

    /// Top-level keys an artifact of this kind must carry.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            OutputKind::DesignTokens => &["colors", "typography"],
            OutputKind::ComponentCatalog => &["components"],
            OutputKind::ScreenLayouts => &["screens"],
            OutputKind::AllAssets => &[
                "version",
                "metadata",
                "design_tokens",
                "component_catalog",
                "screen_layouts",
            ],
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OutputKind::DesignTokens => "design_tokens",
                OutputKind::ComponentCatalog => "component_catalog",
                OutputKind::ScreenLayouts => "screen_layouts",
                OutputKind::AllAssets => "all_assets",
            }
        )
    }
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "design_tokens" | "tokens" => Ok(OutputKind::DesignTokens),
            "component_catalog" | "components" => Ok(OutputKind::ComponentCatalog),
            "screen_layouts" | "layouts" => Ok(OutputKind::ScreenLayouts),
            "all_assets" | "all" => Ok(OutputKind::AllAssets),
            other => Err(format!(
                "Unknown output kind '{other}'. Expected design-tokens, component-catalog, screen-layouts or all-assets."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Error,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunStatus::Completed => "completed",
            RunStatus::Error => "error",
        })
    }
}

/// Identity of the source file, copied from the file envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigmaFileInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl From<&FigmaFile> for FigmaFileInfo {
    fn from(file: &FigmaFile) -> Self {
        let name = file
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| file.document.name.clone());
        Self {
            name,
            version: file.version.clone(),
            last_modified: file.last_modified.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub design_tokens: TokenSummary,
    pub components: ComponentSummary,
    pub layouts: LayoutSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: f64,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub figma_file: FigmaFileInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ExtractionSummary>,
}

impl ExtractionMetadata {
    pub fn completed(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        elapsed: Duration,
        figma_file: FigmaFileInfo,
        summary: ExtractionSummary,
    ) -> Self {
        Self {
            start_time,
            end_time,
            duration_seconds: round_to(elapsed.as_secs_f64(), 3),
            status: RunStatus::Completed,
            error: None,
            figma_file,
            summary: Some(summary),
        }
    }

    pub fn failed(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        elapsed: Duration,
        figma_file: FigmaFileInfo,
        error: &ExtractError,
    ) -> Self {
        Self {
            start_time,
            end_time,
            duration_seconds: round_to(elapsed.as_secs_f64(), 3),
            status: RunStatus::Error,
            error: Some(error.to_string()),
            figma_file,
            summary: None,
        }
    }
}

/// The combined output of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllAssets {
    pub version: String,
    pub metadata: ExtractionMetadata,
    pub design_tokens: DesignTokens,
    pub component_catalog: ComponentCatalog,
    pub screen_layouts: ScreenLayouts,
}

impl AllAssets {
    pub fn new(
        metadata: ExtractionMetadata,
        design_tokens: DesignTokens,
        component_catalog: ComponentCatalog,
        screen_layouts: ScreenLayouts,
    ) -> Self {
        Self {
            version: DAE_OUTPUT_VERSION.to_string(),
            metadata,
            design_tokens,
            component_catalog,
            screen_layouts,
        }
    }

    /// JSON form of one artifact, or of the whole bundle for `AllAssets`.
    pub fn artifact(&self, kind: OutputKind) -> Result<Value> {
        let value = match kind {
            OutputKind::DesignTokens => serde_json::to_value(&self.design_tokens)?,
            OutputKind::ComponentCatalog => serde_json::to_value(&self.component_catalog)?,
            OutputKind::ScreenLayouts => serde_json::to_value(&self.screen_layouts)?,
            OutputKind::AllAssets => serde_json::to_value(self)?,
        };
        Ok(value)
    }
}

fn missing_keys(value: &Value, kind: OutputKind) -> Vec<String> {
    let mut missing: Vec<String> = kind
        .required_keys()
        .iter()
        .filter(|key| value.get(**key).is_none())
        .map(|key| key.to_string())
        .collect();

    if kind == OutputKind::AllAssets {
        for nested in OutputKind::artifacts() {
            if let Some(inner) = value.get(nested.to_string()) {
                missing.extend(
                    missing_keys(inner, nested)
                        .into_iter()
                        .map(|key| format!("{nested}.{key}")),
                );
            }
        }
    }
    missing
}

/// Presence check of the keys consumers rely on. Not a schema validation.
pub fn validate_output(value: &Value, kind: OutputKind) -> Result<()> {
    let missing = missing_keys(value, kind);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ExtractError::Validation { kind, missing })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactCheck {
    pub kind: OutputKind,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<ArtifactCheck>,
}

impl ValidationReport {
    pub fn all_valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }

    /// The first failing artifact as an error.
    pub fn into_result(self) -> Result<()> {
        match self.checks.into_iter().find(|c| !c.valid) {
            Some(check) => Err(ExtractError::Validation {
                kind: check.kind,
                missing: check.missing,
            }),
            None => Ok(()),
        }
    }
}

/// Check each of the three artifacts of a run.
pub fn validate_outputs(assets: &AllAssets) -> Result<ValidationReport> {
    let mut checks = Vec::new();
    for kind in OutputKind::artifacts() {
        let missing = missing_keys(&assets.artifact(kind)?, kind);
        tracing::debug!(%kind, valid = missing.is_empty(), "artifact validated");
        checks.push(ArtifactCheck {
            kind,
            valid: missing.is_empty(),
            missing,
        });
    }
    Ok(ValidationReport { checks })
}

/// Markdown summary of a run.
pub fn extraction_report(metadata: &ExtractionMetadata) -> String {
    let mut lines = vec![
        "# Design Asset Extraction Report".to_string(),
        String::new(),
        format!("**Figma File**: {}", metadata.figma_file.name),
    ];
    if let Some(version) = &metadata.figma_file.version {
        lines.push(format!("**Version**: {version}"));
    }
    lines.push(format!("**Status**: {}", metadata.status));
    lines.push(format!("**Duration**: {} seconds", metadata.duration_seconds));
    if let Some(error) = &metadata.error {
        lines.push(format!("**Error**: {error}"));
    }
    lines.push(String::new());

    if let Some(summary) = &metadata.summary {
        let tokens = &summary.design_tokens;
        lines.extend([
            "## Design Tokens".to_string(),
            format!("- Colors: {}", tokens.colors),
            format!("- Typography tokens: {}", tokens.typography_tokens),
            format!("- Spacing values: {}", tokens.spacing_values),
            format!("- Effects shadows: {}", tokens.effects_shadows),
            format!("- Effects blurs: {}", tokens.effects_blurs),
            String::new(),
        ]);

        let components = &summary.components;
        lines.push("## Components".to_string());
        lines.push(format!("- Total components: {}", components.total_components));
        lines.push(format!("- Components with variants: {}", components.with_variants));
        if !components.by_category.is_empty() {
            lines.push("- By category:".to_string());
            for (category, count) in &components.by_category {
                lines.push(format!("  - {category}: {count}"));
            }
        }
        lines.push(String::new());

        let layouts = &summary.layouts;
        lines.push("## Layouts".to_string());
        lines.push(format!("- Total screens: {}", layouts.total_screens));
        lines.push(format!(
            "- Unique screen sizes: {}",
            layouts.screen_sizes.unique_sizes
        ));
        if !layouts.layout_types.is_empty() {
            lines.push("- Layout types:".to_string());
            for (layout_type, count) in &layouts.layout_types {
                lines.push(format!("  - {layout_type}: {count}"));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Result of checking an existing output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateOutput {
    pub version: String,
    pub input: PathBuf,
    pub kind: OutputKind,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// Body emitted when a command fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub version: String,
    pub status: RunStatus,
    pub error: ErrorPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExtractionMetadata>,
}

impl ErrorOutput {
    pub fn new(error: &ExtractError, metadata: Option<ExtractionMetadata>) -> Self {
        Self {
            version: DAE_OUTPUT_VERSION.to_string(),
            status: RunStatus::Error,
            error: error.to_payload(),
            metadata,
        }
    }
}

/// Pretty-print `value` as JSON into `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the three artifacts, the run metadata and the combined bundle into
/// `dir`, creating it if needed. Returns the written paths.
pub fn write_outputs(assets: &AllAssets, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for kind in OutputKind::artifacts() {
        let path = dir.join(kind.file_name());
        write_json(&path, &assets.artifact(kind)?)?;
        written.push(path);
    }

    let metadata_path = dir.join(METADATA_FILE);
    write_json(&metadata_path, &assets.metadata)?;
    written.push(metadata_path);

    let combined = dir.join(OutputKind::AllAssets.file_name());
    write_json(&combined, assets)?;
    written.push(combined);

    tracing::info!(dir = %dir.display(), files = written.len(), "outputs written");
    Ok(written)
}
