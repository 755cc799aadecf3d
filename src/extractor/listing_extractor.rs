use crate::error::{ExtractError, Result};
use crate::extractor::line_parser::{read_listing_line, ListingRecord};
use crate::scanner::{ListingFile, PathMapper};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Line counters for one converted listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub lines_read: u64,
    pub records_written: u64,
    pub lines_skipped: u64,
}

impl ExtractStats {
    pub fn absorb(&mut self, other: ExtractStats) {
        self.lines_read += other.lines_read;
        self.records_written += other.records_written;
        self.lines_skipped += other.lines_skipped;
    }
}

/// Copies every matching listing line from `input` to `output` as a fixture
/// line, dropping the rest. Returns at end of input.
pub fn extract<R: BufRead, W: Write>(mut input: R, output: &mut W) -> io::Result<ExtractStats> {
    let mut stats = ExtractStats::default();
    let mut line = Vec::new();

    while read_listing_line(&mut input, &mut line)? {
        stats.lines_read += 1;

        match ListingRecord::parse(&line) {
            Some(record) => {
                record.write_fixture_line(output)?;
                stats.records_written += 1;
            }
            None => stats.lines_skipped += 1,
        }
    }

    Ok(stats)
}

/// Where one listing went and what came of it.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub stats: ExtractStats,
}

#[derive(Debug)]
pub struct BatchProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub totals: ExtractStats,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub converted: Vec<ConvertedFile>,
    pub errors: Vec<ExtractError>,
}

impl BatchProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            totals: ExtractStats::default(),
            current_file: None,
            start_time: Instant::now(),
            converted: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn record_success(&mut self, converted: ConvertedFile) {
        self.files_processed += 1;
        self.totals.absorb(converted.stats);
        self.current_file = Some(converted.source.display().to_string());
        self.converted.push(converted);
    }

    pub fn add_error(&mut self, error: ExtractError) {
        self.files_processed += 1;
        self.errors.push(error);
    }

    pub fn files_converted(&self) -> usize {
        self.converted.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

const BUFFER_SIZE: usize = 64 * 1024;

pub struct ListingConverter {
    mapper: PathMapper,
    fail_fast: bool,
}

impl ListingConverter {
    pub fn new(mapper: PathMapper) -> Self {
        Self {
            mapper,
            fail_fast: false,
        }
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Converts every listing in order. A failing file is recorded and the
    /// batch moves on, unless fail-fast is set, in which case its error is
    /// returned immediately.
    pub fn convert_all(
        &self,
        listings: &[ListingFile],
        on_file: Option<&dyn Fn(&ConvertedFile)>,
        on_progress: Option<&dyn Fn(&BatchProgress)>,
    ) -> Result<BatchProgress> {
        let mut progress = BatchProgress::new(listings.len());

        for listing in listings {
            if let Some(callback) = on_progress {
                callback(&progress);
            }

            match self.convert_listing(&listing.path) {
                Ok(converted) => {
                    if let Some(callback) = on_file {
                        callback(&converted);
                    }
                    progress.record_success(converted);
                }
                Err(e) if self.fail_fast => return Err(e),
                Err(e) => progress.add_error(e),
            }
        }

        if let Some(callback) = on_progress {
            callback(&progress);
        }

        Ok(progress)
    }

    pub fn convert_listing(&self, source: &Path) -> Result<ConvertedFile> {
        let destination = self.mapper.map_output_path(source)?;
        let stats = self.convert_file(source, &destination)?;

        Ok(ConvertedFile {
            source: source.to_path_buf(),
            destination,
            stats,
        })
    }

    /// Streams one listing into its fixture, truncating any previous fixture.
    /// Both files are closed when this returns, on success or failure.
    pub fn convert_file(&self, source: &Path, destination: &Path) -> Result<ExtractStats> {
        let input = fs::File::open(source).map_err(|e| ExtractError::input_open(source, e))?;
        let output =
            fs::File::create(destination).map_err(|e| ExtractError::output_open(destination, e))?;

        let reader = BufReader::with_capacity(BUFFER_SIZE, input);
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, output);

        let stats = extract(reader, &mut writer)
            .and_then(|stats| writer.flush().map(|()| stats))
            .map_err(|e| ExtractError::convert(source, destination, e))?;

        Ok(stats)
    }
}
