use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dae_lib::{
    extraction_report, AllAssets, ErrorOutput, ExtractError, ExtractionMetadata, ValidateOutput,
};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Everything a command can print.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CliOutput {
    Extract(Box<AllAssets>),
    Validate(ValidateOutput),
    Error(ErrorOutput),
}

/// Write output in the requested format.
pub fn write_output(
    body: &CliOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> dae_lib::Result<()> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(
    err: ExtractError,
    metadata: Option<ExtractionMetadata>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    tracing::error!(error = %err, "command failed");
    let payload = CliOutput::Error(ErrorOutput::new(&err, metadata));

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"status\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is reserved for fatal errors; failed validation uses 1.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &CliOutput, output: Option<&Path>) -> dae_lib::Result<()> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &CliOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content = serde_json::to_string_pretty(body)
        .unwrap_or_else(|_| "{\"status\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &CliOutput, colorize: bool) -> String {
    match body {
        CliOutput::Extract(assets) => {
            let mut buf = String::new();
            let header = color("[EXTRACT]", "36", colorize);
            let status = color(&assets.metadata.status.to_string(), "32", colorize);
            writeln!(
                buf,
                "{} {} ({})",
                header, assets.metadata.figma_file.name, status
            )
            .ok();
            writeln!(
                buf,
                "Colors: {}  Text styles: {}  Spacing steps: {}",
                assets.design_tokens.colors.len(),
                assets.design_tokens.typography.styles.len(),
                assets.design_tokens.spacing.len()
            )
            .ok();
            writeln!(
                buf,
                "Components: {}  Screens: {}  Grids: {}",
                assets.component_catalog.components.len(),
                assets.screen_layouts.screens.len(),
                assets.screen_layouts.grid_systems.len()
            )
            .ok();
            writeln!(buf).ok();
            buf.push_str(&extraction_report(&assets.metadata));
            buf
        }
        CliOutput::Validate(out) => {
            let mut buf = String::new();
            let (status, code) = if out.valid {
                ("VALID", "32")
            } else {
                ("INVALID", "31")
            };
            writeln!(
                buf,
                "{} {} ({})",
                color(status, code, colorize),
                out.input.display(),
                out.kind
            )
            .ok();
            if !out.missing.is_empty() {
                writeln!(buf, "Missing keys:").ok();
                for key in &out.missing {
                    writeln!(buf, "- {key}").ok();
                }
            }
            buf
        }
        CliOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            writeln!(buf, "{} {}", header, out.error.message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            if let Some(metadata) = &out.metadata {
                writeln!(
                    buf,
                    "File: {} (failed after {}s)",
                    metadata.figma_file.name, metadata.duration_seconds
                )
                .ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Determine exit code for a validation outcome.
pub fn exit_code_for_validation(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
