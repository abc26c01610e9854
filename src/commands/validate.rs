use std::path::PathBuf;
use std::process::ExitCode;

use dae_lib::output::DAE_OUTPUT_VERSION;
use dae_lib::{validate_output, ExtractError, OutputKind, ValidateOutput};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_validation, render_error, write_output, CliOutput};

/// Run the validate command.
pub fn run_validate(input: PathBuf, kind: OutputKind, format: OutputFormat) -> ExitCode {
    let value = match read_json(&input) {
        Ok(value) => value,
        Err(err) => return render_error(err, None, format, None),
    };

    let missing = match validate_output(&value, kind) {
        Ok(()) => Vec::new(),
        Err(ExtractError::Validation { missing, .. }) => missing,
        Err(err) => return render_error(err, None, format, None),
    };
    tracing::debug!(input = %input.display(), %kind, missing = missing.len(), "output checked");

    let valid = missing.is_empty();
    let body = CliOutput::Validate(ValidateOutput {
        version: DAE_OUTPUT_VERSION.to_string(),
        input,
        kind,
        valid,
        missing,
    });
    if let Err(err) = write_output(&body, format, None) {
        return render_error(err, None, format, None);
    }
    exit_code_for_validation(valid)
}

fn read_json(path: &std::path::Path) -> dae_lib::Result<Value> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
