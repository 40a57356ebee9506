/*!
 * Error types for the litclock application.
 *
 * The text core (matching, splitting, quoting) never fails; these errors
 * cover fetching and parsing book pages, and writing results out.
 */

use thiserror::Error;

/// Errors that can occur while reading a book site
#[derive(Error, Debug)]
pub enum SiteError {
    /// Error when the HTTP request itself fails
    #[error("Request failed for {url}: {message}")]
    RequestFailed {
        /// Requested URL
        url: String,
        /// Underlying transport error
        message: String,
    },

    /// Error returned by the site as a non-success status
    #[error("Failed to load page {url}: HTTP {status_code}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status_code: u16,
    },

    /// A required element is missing from the page markup
    #[error("Missing element '{selector}' on {page}")]
    MissingElement {
        /// CSS selector that matched nothing
        selector: String,
        /// Which page was being parsed
        page: String,
    },

    /// A CSS selector could not be parsed
    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    /// The first chapter link does not follow the `p-1-<n>` layout
    #[error("Chapter URL has no 'p-1' segment: {0}")]
    InvalidChapterUrl(String),
}

/// Errors that can occur when exporting records
#[derive(Error, Debug)]
pub enum OutputError {
    /// Error serializing records
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}
