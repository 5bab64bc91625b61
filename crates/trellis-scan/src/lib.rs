//! Trellis Scan — start locator expansion, import listing and resolution,
//! discovery filters, and the scan engine

pub mod config;
pub mod error;
pub mod filter;
pub mod imports;
pub mod info;
pub mod locate;
pub mod resolve;
pub mod scan;
pub mod tsconfig;


pub use config::{AliasConfig, AliasPattern, DEFAULT_EXTENSIONS, ScanOptions};
pub use error::ScanError;
pub use filter::{EdgeFilter, Filter, NEGATION, ScanFilters};
pub use imports::{SourceFlavor, list_import_specifiers};
pub use info::{FolderInfo, folder_info};
pub use locate::list_source_files;
pub use resolve::resolve;
pub use scan::{ScanOutcome, start_scan};
pub use tsconfig::load_alias_config;
