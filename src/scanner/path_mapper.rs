use crate::config::Config;
use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};

/// Turns a configured suffix into the extension matched against file names:
/// `o.lst` and `.o.lst` both become `.o.lst`.
pub fn dotted_suffix(suffix: &str) -> String {
    format!(".{}", suffix.trim_start_matches('.'))
}

/// Strips `.<suffix>` from a file name, leaving a non-empty stem.
pub fn listing_stem<'a>(filename: &'a str, dotted: &str) -> Option<&'a str> {
    filename
        .strip_suffix(dotted)
        .filter(|stem| !stem.is_empty())
}

/// Maps a listing path onto the fixture file it is converted into.
///
/// `foo.o.lst` becomes `../data/foo.tst` with the default conventions: the
/// listing extension is dropped from the file name, the fixture extension
/// appended and the result placed under the output directory. The directory
/// is never created here.
#[derive(Debug, Clone)]
pub struct PathMapper {
    input_suffix: String,
    output_dir: PathBuf,
    output_suffix: String,
}

impl PathMapper {
    pub fn new<S, P, T>(input_suffix: S, output_dir: P, output_suffix: T) -> Self
    where
        S: AsRef<str>,
        P: Into<PathBuf>,
        T: AsRef<str>,
    {
        Self {
            input_suffix: dotted_suffix(input_suffix.as_ref()),
            output_dir: output_dir.into(),
            output_suffix: dotted_suffix(output_suffix.as_ref()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.listing.input_suffix,
            config.output.directory.clone(),
            &config.output.suffix,
        )
    }

    pub fn map_output_path(&self, input: &Path) -> Result<PathBuf> {
        let invalid = || ExtractError::InvalidPath {
            path: input.display().to_string(),
        };

        let filename = input.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;

        // Windows-style globs hand back `.\name`, which is not a separator here.
        let filename = filename.strip_prefix(".\\").unwrap_or(filename);

        let stem = listing_stem(filename, &self.input_suffix).ok_or_else(invalid)?;

        Ok(self
            .output_dir
            .join(format!("{}{}", stem, self.output_suffix)))
    }
}

impl Default for PathMapper {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
