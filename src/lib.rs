//! Tally - count non-blank lines and matching files across a directory tree

pub mod config;
pub mod logger;
pub mod stats;
pub mod walker;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::{ConfigError, DEFAULT_CONFIG_FILE, ScanConfig, load_or_report};
pub use stats::{
    ReadError, ScanSummary, count_file_lines, count_files, count_lines, count_lines_with,
    count_non_blank_lines, format_number, print_summary, scan,
};
pub use walker::{ScanWalker, matches_extension};
