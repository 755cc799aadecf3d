use crate::extractor::{BatchProgress, ConvertedFile, ExtractStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub input_dir: String,
    pub output_dir: String,
    pub files_found: usize,
    pub files_converted: usize,
    pub totals: ExtractStats,
    pub files: Vec<FileReport>,
    pub errors: Vec<String>,
    pub duration_ms: u128,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: String,
    pub destination: String,
    #[serde(flatten)]
    pub stats: ExtractStats,
}

impl From<&ConvertedFile> for FileReport {
    fn from(file: &ConvertedFile) -> Self {
        Self {
            source: file.source.display().to_string(),
            destination: file.destination.display().to_string(),
            stats: file.stats,
        }
    }
}

impl BatchReport {
    pub fn from_progress(progress: &BatchProgress, input_dir: &Path, output_dir: &Path) -> Self {
        Self {
            input_dir: input_dir.display().to_string(),
            output_dir: output_dir.display().to_string(),
            files_found: progress.total_files,
            files_converted: progress.files_converted(),
            totals: progress.totals,
            files: progress.converted.iter().map(FileReport::from).collect(),
            errors: progress.errors.iter().map(ToString::to_string).collect(),
            duration_ms: progress.elapsed().as_millis(),
            finished_at: Utc::now(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
