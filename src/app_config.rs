use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::quote_window::{DEFAULT_LONG_PARAGRAPH_THRESHOLD, DEFAULT_WINDOW_RADIUS};

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Book site access settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Quote extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Book site configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SiteConfig {
    // @field: Site root, prefixed to relative chapter links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    // @field: User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retries after a failed request
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Pause between consecutive page requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

/// Quote extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Paragraphs longer than this many characters are quoted by sentence window
    #[serde(default = "default_long_paragraph_threshold")]
    pub long_paragraph_threshold: usize,

    /// Sentences kept on each side of the one containing the time
    #[serde(default = "default_window_radius")]
    pub window_radius: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            long_paragraph_threshold: default_long_paragraph_threshold(),
            window_radius: default_window_radius(),
        }
    }
}

/// Export file format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    // @returns: File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Export configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Export format
    #[serde(default)]
    pub format: OutputFormat,

    /// Remove every record whose quote appears more than once in a batch
    #[serde(default = "default_true")]
    pub drop_duplicate_quotes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            drop_duplicate_quotes: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_base_url() -> String {
    "https://gemibook.com".to_string()
}

fn default_user_agent() -> String {
    concat!("litclock/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_request_delay_ms() -> u64 {
    0
}

fn default_long_paragraph_threshold() -> usize {
    DEFAULT_LONG_PARAGRAPH_THRESHOLD
}

fn default_window_radius() -> usize {
    DEFAULT_WINDOW_RADIUS
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, or write and return the defaults if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(config)
        } else {
            log::warn!("Config file not found at {:?}, creating default config.", path);
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let base_url = url::Url::parse(&self.site.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.site.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(anyhow!("Base URL must use http or https: {}", self.site.base_url));
        }

        if self.site.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        if self.extraction.long_paragraph_threshold == 0 {
            return Err(anyhow!("Long paragraph threshold must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            site: SiteConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
