/*!
 * HTML parsing for the book listing page and chapter pages.
 *
 * Everything here is pure and works on HTML strings so it can be tested
 * against saved fixtures without touching the network.
 */

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::SiteError;

const TITLE_SELECTOR: &str = "h3.title";
const AUTHOR_SELECTOR: &str = "a[itemprop=author]";
const CHAPTER_LIST_SELECTOR: &str = "ul.list-chapter";
const CHAPTER_ITEM_SELECTOR: &str = "li";
const FIRST_PAGE_SELECTOR: &str = "a.btn.btn-primary.btn-sm[href]";
const CHAPTER_CONTENT_SELECTOR: &str = "div.chapter-content";
const PARAGRAPH_SELECTOR: &str = "p";

/// What the listing page says about a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub title: String,
    pub author: String,
    /// Number of chapter entries across all chapter lists
    pub chapter_count: usize,
    /// Absolute URL of the first chapter page
    pub first_page_url: String,
}

fn selector(css: &str) -> Result<Selector, SiteError> {
    Selector::parse(css).map_err(|e| SiteError::InvalidSelector(format!("{}: {:?}", css, e)))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

fn first_match<'a>(document: &'a Html, css: &str, page: &str) -> Result<ElementRef<'a>, SiteError> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .ok_or_else(|| SiteError::MissingElement {
            selector: css.to_string(),
            page: page.to_string(),
        })
}

/// Parse a book listing page.
///
/// `base_url` resolves the relative link to the first chapter.
pub fn parse_book_page(html: &str, base_url: &str) -> Result<BookInfo, SiteError> {
    let document = Html::parse_document(html);
    let page = "book page";

    let title = element_text(&first_match(&document, TITLE_SELECTOR, page)?)
        .trim()
        .to_string();
    let author = element_text(&first_match(&document, AUTHOR_SELECTOR, page)?)
        .trim()
        .to_string();

    let list_sel = selector(CHAPTER_LIST_SELECTOR)?;
    let item_sel = selector(CHAPTER_ITEM_SELECTOR)?;
    let chapter_count = document
        .select(&list_sel)
        .map(|list| list.select(&item_sel).count())
        .sum::<usize>();

    let link = first_match(&document, FIRST_PAGE_SELECTOR, page)?;
    let href = link.value().attr("href").unwrap_or_default();
    let first_page_url = resolve_link(base_url, href)?;

    Ok(BookInfo {
        title,
        author,
        chapter_count,
        first_page_url,
    })
}

/// Join a possibly relative link onto the site root
pub fn resolve_link(base_url: &str, href: &str) -> Result<String, SiteError> {
    let base = Url::parse(base_url).map_err(|_| SiteError::InvalidChapterUrl(base_url.to_string()))?;
    base.join(href)
        .map(|u| u.to_string())
        .map_err(|_| SiteError::InvalidChapterUrl(href.to_string()))
}

/// Text of every paragraph in a chapter page's content block, in page order
pub fn parse_chapter_paragraphs(html: &str) -> Result<Vec<String>, SiteError> {
    let document = Html::parse_document(html);
    let content = first_match(&document, CHAPTER_CONTENT_SELECTOR, "chapter page")?;
    let paragraph_sel = selector(PARAGRAPH_SELECTOR)?;

    Ok(content
        .select(&paragraph_sel)
        .map(|p| element_text(&p))
        .collect())
}

/// Chapter page addresses derived from the first chapter's URL.
///
/// Chapter pages are laid out as `<prefix>p-<page>-<id>` where the id grows by
/// one per page, starting from the id of page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterUrls {
    prefix: String,
    first_id: u64,
}

impl ChapterUrls {
    /// Split the first chapter URL at its `p-1` segment
    pub fn from_first_page(url: &str) -> Result<Self, SiteError> {
        let index = url
            .find("p-1")
            .ok_or_else(|| SiteError::InvalidChapterUrl(url.to_string()))?;
        let prefix = url[..index].to_string();
        let first_id = url
            .get(index + 4..)
            .and_then(|id| id.trim_end_matches('/').parse::<u64>().ok())
            .ok_or_else(|| SiteError::InvalidChapterUrl(url.to_string()))?;

        Ok(Self { prefix, first_id })
    }

    /// URL of a 1-based page number
    pub fn page_url(&self, page: usize) -> String {
        let id = self.first_id + page as u64 - 1;
        format!("{}p-{}-{}", self.prefix, page, id)
    }
}
