use std::path::PathBuf;
use std::process::ExitCode;

use dae_lib::output::METADATA_FILE;
use dae_lib::{load_figma_file, validate_outputs, write_json, write_outputs, DesignAssetExtractor};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_validation, render_error, write_output, CliOutput};
use crate::settings::{load_config, log_effective_config};

/// Run the extract command.
pub fn run_extract(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    no_validate: bool,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, None, format, output),
    };
    if verbose {
        log_effective_config(config_path.as_deref(), &config);
    }

    let file = match load_figma_file(&input) {
        Ok(file) => file,
        Err(err) => return render_error(err, None, format, output),
    };

    let extractor = DesignAssetExtractor::new(config);
    let assets = match extractor.extract_all_assets(&file) {
        Ok(assets) => assets,
        Err(failed) => {
            if let Some(dir) = &output_dir {
                let written = std::fs::create_dir_all(dir)
                    .map_err(dae_lib::ExtractError::from)
                    .and_then(|_| write_json(&dir.join(METADATA_FILE), &failed.metadata));
                if let Err(err) = written {
                    tracing::warn!(error = %err, "could not record failed run metadata");
                }
            }
            return render_error(failed.error, Some(failed.metadata), format, output);
        }
    };

    let mut valid = true;
    if !no_validate {
        match validate_outputs(&assets) {
            Ok(report) => {
                for check in report.checks.iter().filter(|c| !c.valid) {
                    tracing::warn!(
                        kind = %check.kind,
                        missing = %check.missing.join(", "),
                        "artifact failed validation"
                    );
                }
                valid = report.all_valid();
            }
            Err(err) => return render_error(err, Some(assets.metadata), format, output),
        }
    }

    if let Some(dir) = &output_dir {
        if let Err(err) = write_outputs(&assets, dir) {
            return render_error(err, Some(assets.metadata), format, output);
        }
    }

    let metadata = assets.metadata.clone();
    let body = CliOutput::Extract(Box::new(assets));
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(err, Some(metadata), format, output);
    }
    exit_code_for_validation(valid)
}
