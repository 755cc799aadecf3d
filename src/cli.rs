use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extract-lst")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert 68000 assembler listings into CPU test fixtures")]
#[command(
    long_about = "extract-lst reads every *.o.lst listing in the current directory, keeps the \
                  opcode bytes and source text of each assembled line, and writes them \
                  tab-separated to ../data/<name>.tst."
)]
#[command(after_help = "EXAMPLES:\n  \
    extract-lst\n  \
    extract-lst --dry-run\n  \
    extract-lst --input-dir build/asm --output-dir tests/data -v\n  \
    extract-lst --output-format json --fail-fast\n\n\
EXIT STATUS:\n  \
    0  every listing converted, or none found\n  \
    1  bad configuration, unusable input directory, or a --fail-fast abort\n  \
    2  one or more listings failed; the rest were still converted")]
pub struct Cli {
    /// Directory scanned for listing files
    #[arg(short, long, help = "Directory holding the listings (default: .)")]
    pub input_dir: Option<PathBuf>,

    /// Directory the fixture files are written to; must already exist
    #[arg(short, long, help = "Existing directory for fixtures (default: ../data)")]
    pub output_dir: Option<PathBuf>,

    /// File-name suffix selecting listing files
    #[arg(long, help = "Listing file suffix (default: o.lst)")]
    pub input_suffix: Option<String>,

    /// File-name suffix given to fixture files
    #[arg(long, help = "Fixture file suffix (default: tst)")]
    pub output_suffix: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Stop at the first listing that cannot be converted
    #[arg(long)]
    pub fail_fast: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the conversions without writing any file")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_dir(self.input_dir.clone())
            .with_output_dir(self.output_dir.clone())
            .with_input_suffix(self.input_suffix.clone())
            .with_output_suffix(self.output_suffix.clone())
            .with_fail_fast(self.fail_fast)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["extract-lst"]).unwrap();
        assert!(cli.input_dir.is_none());
        assert!(cli.output_dir.is_none());
        assert!(!cli.dry_run);
        assert!(matches!(cli.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_overrides_reach_config() {
        let cli = Cli::try_parse_from([
            "extract-lst",
            "--input-dir",
            "asm",
            "-o",
            "fixtures",
            "--output-suffix",
            "fix",
            "--fail-fast",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());

        assert_eq!(config.listing.input_dir, PathBuf::from("asm"));
        assert_eq!(config.listing.input_suffix, "o.lst");
        assert_eq!(config.output.directory, PathBuf::from("fixtures"));
        assert_eq!(config.output.suffix, "fix");
        assert!(config.batch.fail_fast);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["extract-lst", "-q", "-v"]).is_err());

        let cli = Cli::try_parse_from(["extract-lst", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_help_documents_exit_status() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("EXIT STATUS"));
        assert!(help.contains("2  one or more listings failed"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "extract-lst",
            "--config",
            "/nonexistent/extract-lst.toml",
        ])
        .unwrap();
        assert!(cli.load_config().is_err());
    }
}
