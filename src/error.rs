use crate::extractor::Stage;
use crate::output::OutputKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("{stage} failed: {message}")]
    Stage { stage: Stage, message: String },

    #[error("{stage} exceeded the maximum tree depth of {limit} at node '{node}'")]
    DepthLimit {
        stage: Stage,
        limit: usize,
        node: String,
    },

    #[error("Output validation failed for {kind}: missing {}", .missing.join(", "))]
    Validation {
        kind: OutputKind,
        missing: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    pub fn stage(stage: Stage, message: impl Into<String>) -> Self {
        ExtractError::Stage {
            stage,
            message: message.into(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        ExtractError::InvalidDocument(message.into())
    }

    /// The analyzer stage the error was raised in, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            ExtractError::Stage { stage, .. } | ExtractError::DepthLimit { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            ExtractError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            ExtractError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Verify the input is a Figma file JSON (GET /v1/files/:key response or a cached copy).",
            ),
            ExtractError::InvalidDocument(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Provide a JSON object with a top-level `document` node, a cache entry wrapping one in `data`, or a nodes response.",
            ),
            ExtractError::Stage { .. } => ErrorPayload::new(
                ErrorCategory::Extraction,
                self.to_string(),
                "Re-run with --verbose to see which node triggered the failure.",
            ),
            ExtractError::DepthLimit { .. } => ErrorPayload::new(
                ErrorCategory::Extraction,
                self.to_string(),
                "Raise `max_depth` in the config file if the document is legitimately this deep.",
            ),
            ExtractError::Validation { .. } => ErrorPayload::new(
                ErrorCategory::Validation,
                self.to_string(),
                "Regenerate the output with `dae extract`; hand-edited files may have lost required keys.",
            ),
            ExtractError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("semantic") || lower.contains("hex") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Semantic color table keys must be #rrggbb hex strings.",
                    )
                } else if lower.contains("spacing") || lower.contains("tolerance") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Spacing scales need positive, ascending values and non-negative tolerances.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check the --config file (TOML) against the documented keys.",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Extraction,
    Validation,
    Io,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
