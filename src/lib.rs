/*!
 * # litclock - times of day quoted from books
 *
 * A Rust library for collecting literary clock quotations: every time of day
 * a book mentions ("3:00 PM", "14:05"), with the sentences around it.
 *
 * ## Features
 *
 * - Recognize 12-hour (with AM/PM) and 24-hour clock times in free text
 * - Abbreviation-aware sentence splitting
 * - Bounded quotation windows around each time in long paragraphs
 * - Page through a book on the reading site and collect every match
 * - Export sorted, deduplicated records as CSV or JSON
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `time_matcher`: Clock-time recognition and 24-hour normalization
 * - `sentence_splitter`: Rule-based sentence boundary detection
 * - `quote_window`: Quotation windows around matched times
 * - `site`: Book page fetching and HTML parsing
 * - `records`: Time records, sorting, deduplication and export
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod quote_window;
pub mod records;
pub mod sentence_splitter;
pub mod site;
pub mod time_matcher;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{OutputError, SiteError};
pub use quote_window::{extract_quotes, quotes_for_paragraph, QuoteWindow};
pub use records::{RecordSet, TimeRecord};
pub use sentence_splitter::split_sentences;
pub use time_matcher::{find_times, match_times, TimeFormat, TimeMatch};
