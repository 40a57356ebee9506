/*!
 * Access to the online book site.
 *
 * - `parser`: pure HTML extraction of book info and chapter paragraphs
 * - `client`: page fetching behind the `PageSource` trait
 */

pub mod client;
pub mod parser;

pub use client::{HttpPageSource, PageSource};
pub use parser::{parse_book_page, parse_chapter_paragraphs, BookInfo, ChapterUrls};
