/*!
 * Integration tests for scraping a list of books
 */

use std::sync::Arc;

use litclock::app_config::{Config, OutputFormat};
use litclock::app_controller::Controller;
use litclock::file_utils::FileManager;

use crate::common::{self, CLOCKMAKER_URL, FailingPageSource};

const LAMPLIGHTER_URL: &str = "https://gemibook.com/77-the-lamplighter";

fn two_book_source() -> common::FixturePageSource {
    common::clockmaker_source()
        .with_page(LAMPLIGHTER_URL, common::read_resource("lamplighter_page.html"))
        .with_page(
            "https://gemibook.com/77-the-lamplighter/p-1-3100",
            common::read_resource("lamplighter_1.html"),
        )
}

fn url_list(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

/// Repeated quotes across books are dropped entirely
#[test]
fn test_scrape_many_withSharedQuotes_shouldDropAllCopies() {
    common::init_test_logging();
    let (controller, _) = common::controller_with(two_book_source());

    let urls = url_list(&[CLOCKMAKER_URL, "", LAMPLIGHTER_URL]);
    let records = tokio_test::block_on(controller.scrape_many(&urls)).unwrap();

    let times: Vec<&str> = records.records.iter().map(|r| r.time.as_str()).collect();
    assert_eq!(times, vec!["19:30", "11:45 p.m."]);
    assert_eq!(records.records[0].title, "The Lamplighter");
    assert_eq!(records.records[1].title, "The Clockmaker");
}

/// With deduplication off every record is kept, sorted across books
#[test]
fn test_scrape_many_withoutDedup_shouldKeepEverything() {
    let mut config = Config::default();
    config.output.drop_duplicate_quotes = false;
    let controller = Controller::with_source(config, Arc::new(two_book_source()));

    let urls = url_list(&[CLOCKMAKER_URL, LAMPLIGHTER_URL]);
    let records = tokio_test::block_on(controller.scrape_many(&urls)).unwrap();

    let times: Vec<&str> = records.records.iter().map(|r| r.time.as_str()).collect();
    assert_eq!(times, vec!["7:00 AM", "7:00 AM", "14:05", "3:00 PM", "19:30", "11:45 p.m."]);
    assert_eq!(records.records[0].title, "The Clockmaker");
    assert_eq!(records.records[1].title, "The Lamplighter");
}

/// A book that cannot be scraped is skipped, the rest still come through
#[test]
fn test_scrape_many_withUnknownBook_shouldSkipIt() {
    let (controller, source) = common::controller_with(two_book_source());

    let urls = url_list(&["https://gemibook.com/404-nowhere", LAMPLIGHTER_URL]);
    let records = tokio_test::block_on(controller.scrape_many(&urls)).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(source.requested_urls()[0], "https://gemibook.com/404-nowhere");
}

/// Every book failing still yields an empty, successful result
#[test]
fn test_scrape_many_withFailingSource_shouldReturnEmpty() {
    let controller = Controller::with_source(Config::default(), Arc::new(FailingPageSource));
    let urls = url_list(&[CLOCKMAKER_URL, LAMPLIGHTER_URL]);

    let records = tokio_test::block_on(controller.scrape_many(&urls)).unwrap();
    assert!(records.is_empty());
}

/// URL list file through to CSV export
#[test]
fn test_batch_fromUrlFile_shouldExportCsv() {
    let dir = common::create_temp_dir().unwrap();
    let list = common::create_test_file(
        &dir.path().to_path_buf(),
        "gemibook_urls.csv",
        &format!("{}\n\n{}\n", CLOCKMAKER_URL, LAMPLIGHTER_URL),
    )
    .unwrap();

    let urls = FileManager::read_url_list(&list).unwrap();
    let (controller, _) = common::controller_with(two_book_source());
    let records = tokio_test::block_on(controller.scrape_many(&urls)).unwrap();

    let out = FileManager::generate_output_path(&list, dir.path(), OutputFormat::Csv.extension());
    FileManager::write_to_file(&out, &records.render(OutputFormat::Csv).unwrap()).unwrap();

    let csv = FileManager::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "TIME24,TITLE,AUTHOR,TIMES,PAGE NUMBER,QUOTE");
    assert_eq!(lines[1], "19:30:00,The Lamplighter,Owen Reed,19:30,1,The lamps were lit at 19:30 each evening.");
    assert!(lines[2].starts_with("23:45:00,The Clockmaker,Edith Marsh,11:45 p.m.,1,\"The apprentices"));
    assert_eq!(lines.len(), 3);
    assert!(out.ends_with("gemibook_urls.times.csv"));
}
