pub mod listing_scanner;
pub mod path_mapper;

pub use listing_scanner::{ListingFile, ListingScanner};
pub use path_mapper::PathMapper;
