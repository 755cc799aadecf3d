use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open listing {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create fixture {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed converting {} => {}: {source}", input.display(), output.display())]
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Input directory is not usable: {path}")]
    InputDirectory { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{failed} of {total} listing files failed to convert")]
    BatchFailed { failed: usize, total: usize },
}

impl ExtractError {
    pub fn input_open(path: &Path, source: std::io::Error) -> Self {
        ExtractError::InputOpen {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn output_open(path: &Path, source: std::io::Error) -> Self {
        ExtractError::OutputOpen {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn convert(input: &Path, output: &Path, source: std::io::Error) -> Self {
        ExtractError::Convert {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            source,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractError {
    fn user_message(&self) -> String {
        match self {
            ExtractError::InputOpen { path, source } => {
                format!("Could not open listing {}: {}", path.display(), source)
            }
            ExtractError::OutputOpen { path, source } => {
                format!("Could not create fixture {}: {}", path.display(), source)
            }
            ExtractError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            ExtractError::InputDirectory { path } => {
                format!("Input directory does not exist or is not a directory: {}", path)
            }
            ExtractError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractError::OutputOpen { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Some(
                    "The output directory must exist before running. Create it or pass --output-dir."
                        .to_string(),
                )
            }
            ExtractError::InputDirectory { .. } => Some(
                "Run from the directory holding the .o.lst files or pass --input-dir.".to_string(),
            ),
            ExtractError::Config { .. } => Some(
                "Check your configuration file syntax; --generate-config writes a valid sample."
                    .to_string(),
            ),
            ExtractError::BatchFailed { .. } => Some(
                "Fix the listings reported above and rerun; add --fail-fast to stop at the first failure."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(error: toml::de::Error) -> Self {
        ExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
