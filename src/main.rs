use clap::Parser;
use extract_lst::{
    Cli, ExtractError, ListingExtractor, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let extractor = match ListingExtractor::from_cli(&cli) {
        Ok(extractor) => extractor,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&extractor);
    }

    match extractor.run() {
        Ok(report) => {
            extractor.output_formatter().print_batch_report(&report);

            if report.has_errors() {
                extractor.handle_error(&ExtractError::BatchFailed {
                    failed: report.errors.len(),
                    total: report.files_found,
                });
                2 // Some listings failed
            } else {
                0
            }
        }
        Err(e) => {
            extractor.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "extract-lst.toml".to_string());

    match ListingExtractor::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  extract-lst --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(extractor: &ListingExtractor) -> i32 {
    let formatter = extractor.output_formatter();

    formatter.warning("DRY RUN MODE - No files will be written");

    let plan = match extractor
        .discover()
        .and_then(|listings| extractor.plan(&listings))
    {
        Ok(plan) => plan,
        Err(e) => {
            extractor.handle_error(&e);
            return 1;
        }
    };

    for (source, destination) in &plan {
        formatter.print_conversion(source, destination);
    }

    let output_dir = &extractor.config().output.directory;
    if !plan.is_empty() && !output_dir.is_dir() {
        formatter.warning(&format!(
            "Output directory {} does not exist; every conversion would fail",
            output_dir.display()
        ));
    }

    formatter.info(&format!("{} listings would be converted", plan.len()));
    0
}

fn print_startup_error(error: &ExtractError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
