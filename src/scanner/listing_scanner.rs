use crate::config::ListingConfig;
use crate::error::{ExtractError, Result};
use crate::scanner::path_mapper::{dotted_suffix, listing_stem};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A listing file found by [`ListingScanner::discover`].
#[derive(Debug, Clone)]
pub struct ListingFile {
    pub path: PathBuf,
    pub filename: String,
}

impl ListingFile {
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { path, filename }
    }
}

pub struct ListingScanner {
    input_dir: PathBuf,
    suffix: String,
}

impl ListingScanner {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            input_dir: config.input_dir.clone(),
            suffix: dotted_suffix(&config.input_suffix),
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// The extension matched, leading dot included.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Lists the listing files directly inside the input directory.
    ///
    /// Equivalent to globbing `<input_dir>/*.<suffix>`: no recursion, dotfiles
    /// are not matched. The result is sorted by file name and may be empty.
    pub fn discover(&self) -> Result<Vec<ListingFile>> {
        if !self.input_dir.is_dir() {
            return Err(ExtractError::InputDirectory {
                path: self.input_dir.display().to_string(),
            });
        }

        let walker = WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();

        let mut listings = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => ExtractError::Io(io),
                None => ExtractError::InputDirectory {
                    path: self.input_dir.display().to_string(),
                },
            })?;

            if self.is_listing(&entry) {
                listings.push(ListingFile::new(entry.path().to_path_buf()));
            }
        }

        Ok(listings)
    }

    fn is_listing(&self, entry: &DirEntry) -> bool {
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };

        if name.starts_with('.') || listing_stem(name, &self.suffix).is_none() {
            return false;
        }

        // Symlinks count when they point at a regular file.
        entry.file_type().is_file() || entry.path().is_file()
    }
}
