pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{BatchConfig, CliOverrides, Config, ListingConfig, OutputConfig};
pub use error::{ExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    extract, BatchProgress, BatchReport, ConvertedFile, ExtractStats, ListingConverter,
    ListingRecord,
};
pub use scanner::{ListingFile, ListingScanner, PathMapper};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::path::{Path, PathBuf};

/// Converts a directory of listings into fixture files.
pub struct ListingExtractor {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl ListingExtractor {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    pub fn scanner(&self) -> ListingScanner {
        ListingScanner::new(&self.config.listing)
    }

    pub fn mapper(&self) -> PathMapper {
        PathMapper::from_config(&self.config)
    }

    /// Finds the listings to convert.
    pub fn discover(&self) -> Result<Vec<ListingFile>> {
        let scanner = self.scanner();
        self.output_formatter.start_operation(&format!(
            "Scanning {} for *{}",
            scanner.input_dir().display(),
            scanner.suffix()
        ));

        let listings = scanner.discover()?;
        self.output_formatter
            .info(&format!("Found {} listing files", listings.len()));

        Ok(listings)
    }

    /// Pairs each listing with its fixture path without touching any file.
    pub fn plan(&self, listings: &[ListingFile]) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mapper = self.mapper();
        listings
            .iter()
            .map(|listing| {
                let destination = mapper.map_output_path(&listing.path)?;
                Ok((listing.path.clone(), destination))
            })
            .collect()
    }

    /// Discovers and converts every listing, one file at a time.
    pub fn run(&self) -> Result<BatchReport> {
        let listings = self.discover()?;

        if listings.is_empty() {
            let scanner = self.scanner();
            self.output_formatter.warning(&format!(
                "No *{} files in {}",
                scanner.suffix(),
                scanner.input_dir().display()
            ));
        }

        let progress = self.convert(&listings)?;
        self.output_formatter.print_batch_summary(&progress);

        Ok(BatchReport::from_progress(
            &progress,
            &self.config.listing.input_dir,
            &self.config.output.directory,
        ))
    }

    fn convert(&self, listings: &[ListingFile]) -> Result<BatchProgress> {
        let file_progress = self
            .progress_manager
            .create_file_progress(listings.len() as u64);
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));

        let on_file = |file: &ConvertedFile| output.converted(file);
        let on_progress = {
            let pb = file_progress.clone();
            move |progress: &BatchProgress| ui::progress::update_file_progress(&pb, progress)
        };

        let converter = ListingConverter::new(self.mapper())
            .with_fail_fast(self.config.batch.fail_fast);

        let result = converter.convert_all(listings, Some(&on_file), Some(&on_progress));

        match result {
            Ok(progress) => {
                ui::progress::finish_progress_with_summary(
                    &file_progress,
                    &format!("Converted {} listings", progress.files_converted()),
                    progress.elapsed(),
                );
                self.progress_manager.clear();
                Ok(progress)
            }
            Err(e) => {
                file_progress.abandon();
                self.progress_manager.clear();
                Err(e)
            }
        }
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &ExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
