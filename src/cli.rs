use clap::{Parser, Subcommand, ValueEnum};
use dae_lib::OutputKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dae")]
#[command(
    version,
    about = "Design Asset Extractor - Derive design tokens, components and layouts from Figma files",
    long_about = "Design Asset Extractor (DAE)\n\nCommands:\n- extract: analyze a Figma file JSON (files response, cache entry or nodes response) and emit design tokens, a component catalog and screen layouts.\n- validate: check that a previously written output still carries the keys consumers rely on.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) overriding keyword tables, colour table, spacing scale and tolerances"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract design tokens, components and screen layouts from a Figma file
    Extract {
        #[arg(long, short, help = "Figma file JSON to analyze")]
        input: PathBuf,

        #[arg(
            long,
            value_name = "DIR",
            help = "Write design_tokens.json, component_catalog.json, screen_layouts.json, extraction_metadata.json and all_assets.json here; created if missing"
        )]
        output_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Skip the presence check of the generated artifacts")]
        no_validate: bool,
    },
    /// Check an existing output file for its required keys
    Validate {
        #[arg(long, short, help = "Output JSON file to check")]
        input: PathBuf,

        #[arg(
            long,
            value_enum,
            default_value = "all-assets",
            help = "Kind of output the file holds"
        )]
        kind: KindArg,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    DesignTokens,
    ComponentCatalog,
    ScreenLayouts,
    AllAssets,
}

impl From<KindArg> for OutputKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::DesignTokens => OutputKind::DesignTokens,
            KindArg::ComponentCatalog => OutputKind::ComponentCatalog,
            KindArg::ScreenLayouts => OutputKind::ScreenLayouts,
            KindArg::AllAssets => OutputKind::AllAssets,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_defaults() {
        let cli = Cli::parse_from(["dae", "extract", "--input", "file.json"]);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Extract {
                input,
                output_dir,
                format,
                output,
                no_validate,
            } => {
                assert_eq!(input, PathBuf::from("file.json"));
                assert!(output_dir.is_none());
                assert!(matches!(format, OutputFormat::Json));
                assert!(output.is_none());
                assert!(!no_validate);
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn extract_accepts_overrides_and_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "dae",
            "extract",
            "--input",
            "file.json",
            "--output-dir",
            "out",
            "--format",
            "pretty",
            "--no-validate",
            "--config",
            "dae.toml",
            "--verbose",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("dae.toml")));
        match cli.command {
            Commands::Extract {
                output_dir,
                format,
                no_validate,
                ..
            } => {
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(matches!(format, OutputFormat::Pretty));
                assert!(no_validate);
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn validate_parses_kebab_case_kinds() {
        let cli = Cli::parse_from([
            "dae",
            "validate",
            "--input",
            "out/design_tokens.json",
            "--kind",
            "design-tokens",
        ]);
        match cli.command {
            Commands::Validate { kind, .. } => {
                assert_eq!(kind, KindArg::DesignTokens);
                assert_eq!(OutputKind::from(kind), OutputKind::DesignTokens);
            }
            _ => panic!("expected validate command"),
        }
        assert!(Cli::try_parse_from(["dae", "validate", "--input", "x", "--kind", "palette"]).is_err());
    }
}
