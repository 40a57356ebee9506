use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::quote_window::quotes_for_paragraph;
use crate::records::{RecordSet, TimeRecord};
use crate::site::{parse_book_page, parse_chapter_paragraphs, BookInfo, ChapterUrls, HttpPageSource, PageSource};
use crate::time_matcher::{find_times, normalize_time};

// @module: Application controller for book scraping

// @const: Blank-line paragraph separator for local text files
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

/// Main application controller for time extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Where pages come from
    source: Arc<dyn PageSource>,
}

impl Controller {
    // @method: Create a controller that fetches pages over HTTP
    pub fn with_config(config: Config) -> Result<Self> {
        let source = HttpPageSource::new(&config.site)
            .context("Failed to create HTTP client")?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    // @method: Create a controller with a custom page source
    pub fn with_source(config: Config, source: Arc<dyn PageSource>) -> Self {
        Self { config, source }
    }

    /// Turn one paragraph into records: one per time found, each with its quote
    pub fn process_paragraph(&self, text: &str, page: usize, book: &BookInfo) -> Vec<TimeRecord> {
        let matches = find_times(text);
        if matches.is_empty() {
            return Vec::new();
        }

        let extraction = &self.config.extraction;
        let quotes = quotes_for_paragraph(
            text,
            &matches,
            extraction.long_paragraph_threshold,
            extraction.window_radius,
        );

        matches
            .into_iter()
            .zip(quotes)
            .map(|(time, quote)| TimeRecord {
                time24: normalize_time(&time),
                title: book.title.clone(),
                author: book.author.clone(),
                time,
                page,
                quote,
            })
            .collect()
    }

    /// Fetch and parse a book's listing page
    pub async fn fetch_book_info(&self, url: &str) -> Result<BookInfo> {
        let html = self.source.fetch(url).await?;
        let info = parse_book_page(&html, &self.config.site.base_url)
            .with_context(|| format!("Failed to read book page {}", url))?;
        Ok(info)
    }

    /// Scrape every chapter page of one book, sorted by time
    pub async fn scrape_book(&self, url: &str) -> Result<RecordSet> {
        let book = self.fetch_book_info(url).await?;
        info!("{} by {} ({} pages)", book.title, book.author, book.chapter_count);
        debug!("First page: {}", book.first_page_url);

        let chapter_urls = ChapterUrls::from_first_page(&book.first_page_url)
            .with_context(|| format!("Cannot page through '{}'", book.title))?;

        let progress_bar = ProgressBar::new(book.chapter_count as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar.set_message(book.title.clone());

        let mut records = RecordSet::new();
        for page in 1..=book.chapter_count {
            let page_url = chapter_urls.page_url(page);
            let html = self.source.fetch(&page_url).await?;
            let paragraphs = parse_chapter_paragraphs(&html)
                .with_context(|| format!("Failed to read page {} of '{}'", page, book.title))?;

            for paragraph in &paragraphs {
                records.extend(self.process_paragraph(paragraph, page, &book));
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!("Found {} times in '{}'", records.len(), book.title);
        records.sort_by_time();
        Ok(records)
    }

    /// Scrape a list of books into one sorted set.
    ///
    /// Blank entries and books that fail are logged and skipped.
    pub async fn scrape_many(&self, urls: &[String]) -> Result<RecordSet> {
        let mut all = RecordSet::new();
        let mut failures = 0;

        for (line, url) in urls.iter().enumerate() {
            let url = url.trim();
            if url.is_empty() {
                error!("Empty URL at line {}", line + 1);
                continue;
            }

            match self.scrape_book(url).await {
                Ok(records) => all.extend(records.records),
                Err(e) => {
                    failures += 1;
                    error!("Error scraping {}: {:#}", url, e);
                }
            }
        }

        if failures > 0 {
            warn!("{} book(s) could not be scraped", failures);
        }

        all.sort_by_time();
        if self.config.output.drop_duplicate_quotes {
            let removed = all.drop_duplicate_quotes();
            info!("Dropped {} records with repeated quotes", removed);
        }
        Ok(all)
    }

    /// Extract times from local text, one paragraph per blank-line separated block
    pub fn scan_text(&self, text: &str, title: &str, author: &str) -> RecordSet {
        let book = BookInfo {
            title: title.to_string(),
            author: author.to_string(),
            chapter_count: 1,
            first_page_url: String::new(),
        };

        let mut records: RecordSet = PARAGRAPH_BREAK
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .flat_map(|p| self.process_paragraph(p, 1, &book))
            .collect();
        records.sort_by_time();
        records
    }

    /// Scan a text file, or every `.txt` file under a directory
    pub fn scan_path(&self, path: &Path, author: &str) -> Result<RecordSet> {
        let files = if FileManager::dir_exists(path) {
            FileManager::find_files(path, "txt")?
        } else if FileManager::file_exists(path) {
            vec![path.to_path_buf()]
        } else {
            return Err(anyhow!("Input path does not exist: {:?}", path));
        };

        let mut all = RecordSet::new();
        for file in &files {
            let text = FileManager::read_to_string(file)?;
            let title = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let records = self.scan_text(&text, &title, author);
            info!("{:?}: {} times", file, records.len());
            all.extend(records.records);
        }

        all.sort_by_time();
        Ok(all)
    }
}
