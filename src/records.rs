/*!
 * Time records and their export.
 *
 * A record ties one matched time to the book, page and quotation it came
 * from. Sets of records are sorted by clock time, deduplicated by quote and
 * written out as CSV or JSON.
 */

use chrono::NaiveTime;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::app_config::OutputFormat;
use crate::errors::OutputError;
use crate::time_matcher::format_time24;

/// Column headers of the CSV export, in order
pub const CSV_HEADERS: [&str; 6] = ["TIME24", "TITLE", "AUTHOR", "TIMES", "PAGE NUMBER", "QUOTE"];

fn serialize_time24<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&format_time24(t)),
        None => serializer.serialize_none(),
    }
}

/// One matched time with its context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRecord {
    /// Normalized 24-hour time, absent when the match is not a real clock time
    #[serde(serialize_with = "serialize_time24")]
    pub time24: Option<NaiveTime>,
    pub title: String,
    pub author: String,
    /// Time exactly as written in the book
    pub time: String,
    /// 1-based chapter page the time was found on
    pub page: usize,
    pub quote: String,
}

impl TimeRecord {
    /// Values in CSV column order
    fn csv_fields(&self) -> [String; 6] {
        [
            self.time24.as_ref().map(format_time24).unwrap_or_default(),
            self.title.clone(),
            self.author.clone(),
            self.time.clone(),
            self.page.to_string(),
            self.quote.clone(),
        ]
    }
}

impl fmt::Display for TimeRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let time24 = self.time24.as_ref().map(format_time24).unwrap_or_else(|| "--:--:--".to_string());
        write!(f, "{} {} ({}, p. {}): {}", time24, self.title, self.author, self.page, self.quote)
    }
}

/// Quote a CSV field when it holds a separator, quote or line break
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line<I: IntoIterator<Item = S>, S: AsRef<str>>(fields: I) -> String {
    fields
        .into_iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Ordered collection of time records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub records: Vec<TimeRecord>,
}

impl RecordSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append records, keeping their order
    pub fn extend<I: IntoIterator<Item = TimeRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    /// Stable sort by normalized time; records without one go last
    pub fn sort_by_time(&mut self) {
        self.records.sort_by(|a, b| match (&a.time24, &b.time24) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    /// Remove every record whose quote occurs more than once, keeping none of them.
    ///
    /// Returns the number of records removed.
    pub fn drop_duplicate_quotes(&mut self) -> usize {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.quote.as_str()).or_insert(0) += 1;
        }
        let duplicated: std::collections::HashSet<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(quote, _)| quote.to_string())
            .collect();

        let before = self.records.len();
        self.records.retain(|r| !duplicated.contains(&r.quote));
        before - self.records.len()
    }

    /// Render as CSV with a header row
    pub fn to_csv(&self) -> String {
        let mut out = csv_line(CSV_HEADERS);
        out.push('\n');
        for record in &self.records {
            out.push_str(&csv_line(record.csv_fields()));
            out.push('\n');
        }
        out
    }

    /// Render as a pretty JSON array
    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String, OutputError> {
        match format {
            OutputFormat::Csv => Ok(self.to_csv()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

impl FromIterator<TimeRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = TimeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
