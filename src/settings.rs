use std::path::Path;

use dae_lib::{ExtractError, ExtractorConfig};

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/dae/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<ExtractorConfig, ExtractError> {
    let cfg = ExtractorConfig::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| ExtractorConfig::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        ExtractError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        ExtractError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Log the effective config (visible with --verbose).
pub fn log_effective_config(config_path: Option<&Path>, config: &ExtractorConfig) {
    let config_source = config_path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "defaults/built-in".to_string());
    tracing::debug!(
        source = %config_source,
        max_depth = config.max_depth,
        semantic_colors = config.colors.semantic.len(),
        gray_threshold = config.colors.gray_threshold,
        spacing_steps = config.spacing.steps.len(),
        spacing_tolerance = config.spacing.tolerance,
        component_size = %format!("{}..={}", config.components.min_size, config.components.max_size),
        variant_rules = config.components.variants.len(),
        grid_tolerance = config.layout.grid_tolerance,
        common_spacing_tolerance = config.layout.common_spacing_tolerance,
        "effective config"
    );
}
