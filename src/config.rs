use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default locations checked in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["extract-lst.toml", ".extract-lst.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub listing: ListingConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    pub input_dir: PathBuf,
    pub input_suffix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub suffix: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConfig {
    pub fail_fast: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            input_suffix: "o.lst".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("../data"),
            suffix: "tst".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in DEFAULT_CONFIG_FILES {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.listing.input_dir = input_dir.clone();
        }

        if let Some(ref suffix) = cli_args.input_suffix {
            self.listing.input_suffix = suffix.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }

        if let Some(ref suffix) = cli_args.output_suffix {
            self.output.suffix = suffix.clone();
        }

        if cli_args.fail_fast {
            self.batch.fail_fast = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.listing.input_suffix.is_empty() {
            return Err(ExtractError::Config {
                message: "Listing suffix must not be empty".to_string(),
            });
        }

        if self.output.suffix.is_empty() {
            return Err(ExtractError::Config {
                message: "Output suffix must not be empty".to_string(),
            });
        }

        // Suffixes are matched against bare file names.
        for suffix in [&self.listing.input_suffix, &self.output.suffix] {
            if suffix.contains('/') || suffix.contains('\\') {
                return Err(ExtractError::Config {
                    message: format!("Suffix cannot contain a path separator: {}", suffix),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub input_suffix: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub output_suffix: Option<String>,
    pub fail_fast: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_input_suffix(mut self, suffix: Option<String>) -> Self {
        self.input_suffix = suffix;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_output_suffix(mut self, suffix: Option<String>) -> Self {
        self.output_suffix = suffix;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listing.input_dir, PathBuf::from("."));
        assert_eq!(config.listing.input_suffix, "o.lst");
        assert_eq!(config.output.directory, PathBuf::from("../data"));
        assert_eq!(config.output.suffix, "tst");
        assert!(!config.batch.fail_fast);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.output.suffix.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.listing.input_suffix = "sub/o.lst".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[output]\ndirectory = \"fixtures\"").unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.output.directory, PathBuf::from("fixtures"));
        assert_eq!(loaded_config.listing.input_suffix, "o.lst");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[batch]\nfail_fast = true").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(config.batch.fail_fast);
        assert_eq!(config.output.suffix, "tst");
        assert_eq!(config.listing.input_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/extract-lst.toml");
        assert!(matches!(result, Err(ExtractError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_output_dir(Some(PathBuf::from("out")))
            .with_input_suffix(Some("lst".to_string()))
            .with_fail_fast(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.listing.input_suffix, "lst");
        assert_eq!(config.output.suffix, "tst");
        assert!(config.batch.fail_fast);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[listing]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[batch]"));
        assert!(sample.contains("o.lst"));
    }
}
