use crate::error::{ExtractError, UserFriendlyError};
use crate::extractor::{BatchProgress, BatchReport, ConvertedFile};
use crate::ui::ProgressManager;
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Error,
    Suggestion,
    Warning,
    Start,
    Info,
    Debug,
}

impl Level {
    /// Verbosity a message needs before it is shown. Errors and their
    /// suggestions are shown even with `--quiet`.
    fn threshold(self) -> Option<u8> {
        match self {
            Level::Error | Level::Suggestion => None,
            Level::Warning => Some(0),
            Level::Start | Level::Info => Some(1),
            Level::Debug => Some(2),
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Suggestion => "SUGGESTION",
            Level::Warning => "WARNING",
            Level::Start => "STARTING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    fn json_name(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Suggestion => "suggestion",
            Level::Warning => "warning",
            Level::Start => "operation_start",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Suggestion)
    }
}

/// Prints everything the tool says, in the selected mode.
///
/// Diagnostics go to stderr in human and plain modes. In JSON mode every
/// message is one object per line on stdout.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors =
            mode == OutputMode::Human && !quiet && Term::stdout().features().colors_supported();

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Start, operation);
    }

    /// The one-line notice printed for every listing: `source => destination`.
    pub fn print_conversion(&self, source: &Path, destination: &Path) {
        if !self.shows(Level::Warning) {
            return;
        }

        match self.mode {
            OutputMode::Json => println!(
                "{}",
                serde_json::json!({
                    "type": "conversion",
                    "source": source.display().to_string(),
                    "destination": destination.display().to_string(),
                })
            ),
            _ if self.use_colors => println!(
                "{} => {}",
                style(source.display()).cyan(),
                style(destination.display()).green()
            ),
            _ => println!("{} => {}", source.display(), destination.display()),
        }
    }

    pub fn print_converted_file(&self, file: &ConvertedFile) {
        self.print_conversion(&file.source, &file.destination);
        self.debug(&format!(
            "{}: {} lines read, {} records written, {} lines skipped",
            file.source.display(),
            file.stats.lines_read,
            file.stats.records_written,
            file.stats.lines_skipped
        ));
    }

    pub fn print_user_friendly_error(&self, error: &ExtractError) {
        self.emit(Level::Error, &error.user_message());
        if let Some(suggestion) = error.suggestion() {
            self.emit(Level::Suggestion, &suggestion);
        }
    }

    /// Reports each failed listing, then the totals at `-v` and above.
    /// JSON runs get all of this from [`Self::print_batch_report`] instead.
    pub fn print_batch_summary(&self, progress: &BatchProgress) {
        if self.mode == OutputMode::Json {
            return;
        }

        for error in &progress.errors {
            self.print_user_friendly_error(error);
        }

        if !self.shows(Level::Info) {
            return;
        }

        let headline = format!(
            "Converted {} of {} listing files",
            progress.files_converted(),
            progress.total_files
        );
        let mut rows = vec![
            ("Records written", progress.totals.records_written.to_string()),
            ("Lines skipped", progress.totals.lines_skipped.to_string()),
            ("Time taken", format_duration(progress.elapsed())),
        ];
        if !progress.errors.is_empty() {
            rows.push(("Errors", progress.errors.len().to_string()));
        }

        if self.mode == OutputMode::Plain {
            println!("COMPLETED: {}", headline);
            for (label, value) in rows {
                println!("{}: {}", label, value);
            }
            return;
        }

        println!("{}", self.rule());
        if self.use_colors {
            println!("{}{}", CHECKMARK, style(headline).green().bold());
        } else {
            println!("✓ {}", headline);
        }
        for (label, value) in rows {
            println!("  {:<17}{}", format!("{}:", label), value);
        }
        println!("{}", self.rule());
    }

    pub fn print_batch_report(&self, report: &BatchReport) {
        if self.mode == OutputMode::Json {
            let json_output =
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json_output);
        }
    }

    fn shows(&self, level: Level) -> bool {
        match level.threshold() {
            None => true,
            Some(min) => !self.quiet && self.verbose_level >= min,
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.shows(level) {
            return;
        }

        let line = self.render(level, message);
        if level.to_stderr() && self.mode != OutputMode::Json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn render(&self, level: Level, message: &str) -> String {
        match self.mode {
            OutputMode::Plain => format!("{}: {}", level.tag(), message),
            OutputMode::Json => serde_json::json!({
                "type": "message",
                "level": level.json_name(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })
            .to_string(),
            OutputMode::Human if self.use_colors => match level {
                Level::Error => format!("{}{}", CROSS, style(message).red().bold()),
                Level::Suggestion => {
                    format!("{}{}", INFO, style(format!("Suggestion: {}", message)).cyan())
                }
                Level::Warning => format!("{}{}", WARNING, style(message).yellow().bold()),
                Level::Start => format!("{}{}", ROCKET, style(message).bold()),
                Level::Info => format!("{}{}", INFO, style(message).cyan()),
                Level::Debug => format!("  {}", style(message).dim()),
            },
            OutputMode::Human => match level {
                Level::Error => format!("✗ {}", message),
                Level::Suggestion => format!("Suggestion: {}", message),
                Level::Warning => format!("! {}", message),
                Level::Start => format!("> {}", message),
                Level::Info => format!("i {}", message),
                Level::Debug => format!("  DEBUG: {}", message),
            },
        }
    }

    fn rule(&self) -> String {
        if self.use_colors {
            style("─".repeat(60)).dim().to_string()
        } else {
            "-".repeat(60)
        }
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

// Routes output around an active progress bar.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(
        formatter: &'a OutputFormatter,
        progress_manager: Option<&'a ProgressManager>,
    ) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    pub fn converted(&self, file: &ConvertedFile) {
        match self.progress_manager {
            Some(pm) => pm.suspend(|| self.formatter.print_converted_file(file)),
            None => self.formatter.print_converted_file(file),
        }
    }
}
