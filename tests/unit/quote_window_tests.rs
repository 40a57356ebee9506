/*!
 * Tests for sentence-window quotations
 */

use litclock::quote_window::{
    extract_quotes, extract_quotes_with_radius, is_long_paragraph, quotes_for_paragraph, QuoteWindow,
    DEFAULT_LONG_PARAGRAPH_THRESHOLD, DEFAULT_WINDOW_RADIUS,
};
use litclock::sentence_splitter::split_sentences;
use litclock::time_matcher::find_times;

use crate::common;

/// Twelve sentences, one time in sentence `at`
fn paragraph_with_time_at(at: usize) -> String {
    (0..12)
        .map(|i| {
            if i == at {
                format!("Sentence {} ends at 10:10 PM sharp.", i)
            } else {
                format!("Sentence {} has no clock in it.", i)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One quote per match, in match order
#[test]
fn test_extract_quotes_withSeveralMatches_shouldReturnOnePerMatch() {
    let text = "It began at 1:00 AM. Then nothing. Then more nothing. At 2:00 AM it ended. Quiet again.";
    let matches = find_times(text);
    let quotes = extract_quotes(text, &matches);
    assert_eq!(quotes.len(), matches.len());
    assert!(quotes[0].contains("1:00 AM"));
    assert!(quotes[1].contains("2:00 AM"));
}

/// Every non-empty quote contains its match and stays within the window size
#[test]
fn test_extract_quotes_everyPosition_shouldContainMatchAndRespectBounds() {
    for at in 0..12 {
        let text = paragraph_with_time_at(at);
        let matches = find_times(&text);
        let quotes = extract_quotes(&text, &matches);
        let sentences_in_quote = split_sentences(&quotes[0]).len();

        assert!(quotes[0].contains("10:10 PM"), "position {}", at);
        assert!(sentences_in_quote <= 2 * DEFAULT_WINDOW_RADIUS + 1, "position {}", at);
        assert!(sentences_in_quote >= DEFAULT_WINDOW_RADIUS + 1, "position {}", at);
    }
}

/// Windows at both ends of the paragraph are clipped, not shifted
#[test]
fn test_quote_window_atEdges_shouldClip() {
    assert_eq!(QuoteWindow::around(0, 12, 3), QuoteWindow { start: 0, end: 4 });
    assert_eq!(QuoteWindow::around(11, 12, 3), QuoteWindow { start: 8, end: 12 });
    assert_eq!(QuoteWindow::around(10, 12, 3), QuoteWindow { start: 7, end: 12 });
    assert_eq!(QuoteWindow::around(6, 12, 3).len(), 7);
}

/// Short paragraphs are quoted whole, once per match
#[test]
fn test_quotes_for_paragraph_shortParagraph_shouldRepeatWholeText() {
    let text = "At 5:00 AM and again at 17:00 the ferry sounded.";
    let matches = find_times(text);
    let quotes = quotes_for_paragraph(text, &matches, DEFAULT_LONG_PARAGRAPH_THRESHOLD, DEFAULT_WINDOW_RADIUS);
    assert_eq!(quotes, vec![text.to_string(), text.to_string()]);
}

/// Exactly 500 characters is still short, 501 is long
#[test]
fn test_is_long_paragraph_atThreshold_shouldBeStrict() {
    let exactly = "a".repeat(500);
    let over = "a".repeat(501);
    assert!(!is_long_paragraph(&exactly, DEFAULT_LONG_PARAGRAPH_THRESHOLD));
    assert!(is_long_paragraph(&over, DEFAULT_LONG_PARAGRAPH_THRESHOLD));
}

/// Threshold counts characters, so accented text is not penalized for its bytes
#[test]
fn test_is_long_paragraph_withMultibyteText_shouldCountChars() {
    let text = "é".repeat(400);
    assert!(text.len() > DEFAULT_LONG_PARAGRAPH_THRESHOLD);
    assert!(!is_long_paragraph(&text, DEFAULT_LONG_PARAGRAPH_THRESHOLD));
}

/// The long fixture paragraph yields a seven-sentence window around its time
#[test]
fn test_quotes_for_paragraph_withLongFixtureParagraph_shouldWindow() {
    let html = common::read_resource("chapter_1.html");
    let paragraphs = litclock::site::parse_chapter_paragraphs(&html).unwrap();
    let long = &paragraphs[1];
    let matches = find_times(long);

    assert_eq!(matches, vec!["11:45 p.m."]);
    let quotes = quotes_for_paragraph(long, &matches, DEFAULT_LONG_PARAGRAPH_THRESHOLD, DEFAULT_WINDOW_RADIUS);
    assert!(quotes[0].starts_with("The apprentices said it had never lost a second."));
    assert!(quotes[0].ends_with("Dr. Price, who lived upstairs, heard nothing at all."));
    assert_eq!(split_sentences(&quotes[0]).len(), 7);
}

/// Radius zero quotes just the sentence holding the time
#[test]
fn test_extract_quotes_withZeroRadius_shouldReturnSingleSentence() {
    let text = "First. The clock struck 12:00 at last. Third.";
    let quotes = extract_quotes_with_radius(text, &find_times(text), 0);
    assert_eq!(quotes, vec!["The clock struck 12:00 at last.".to_string()]);
}

/// A configured radius far beyond the paragraph quotes every sentence
#[test]
fn test_quotes_for_paragraph_withMaximumRadius_shouldNotOverflow() {
    let text = paragraph_with_time_at(4).repeat(2);
    assert!(is_long_paragraph(&text, DEFAULT_LONG_PARAGRAPH_THRESHOLD));

    let matches = find_times(&text);
    let quotes = quotes_for_paragraph(&text, &matches, DEFAULT_LONG_PARAGRAPH_THRESHOLD, usize::MAX);
    let whole = split_sentences(&text).join(" ");
    assert!(quotes.iter().all(|q| *q == whole));
}

/// Dialogue ending on a time keeps its quote even though the match takes the period
#[test]
fn test_quotes_for_paragraph_withTimeEndingDialogue_shouldQuoteSentence() {
    let filler = "The hall was quiet and the candles had burned low on every table.";
    let text = format!(
        "{f} {f} {f} \"I will be back at 9:00 PM.\" He nodded. {f} {f} {f} {f}",
        f = filler
    );
    assert!(is_long_paragraph(&text, DEFAULT_LONG_PARAGRAPH_THRESHOLD));

    let matches = find_times(&text);
    assert_eq!(matches, vec!["9:00 PM."]);

    let quotes = quotes_for_paragraph(&text, &matches, DEFAULT_LONG_PARAGRAPH_THRESHOLD, DEFAULT_WINDOW_RADIUS);
    assert!(quotes[0].contains("\"I will be back at 9:00 PM\"."));
    assert!(quotes[0].contains("He nodded."));
    assert_eq!(split_sentences(&quotes[0]).len(), 7);
}
