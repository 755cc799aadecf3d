pub mod batch_report;
pub mod line_parser;
pub mod listing_extractor;

pub use batch_report::{BatchReport, FileReport};
pub use line_parser::{read_listing_line, ListingRecord, LINE_PATTERN};
pub use listing_extractor::{extract, BatchProgress, ConvertedFile, ExtractStats, ListingConverter};
