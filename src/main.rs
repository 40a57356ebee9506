// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use litclock::app_config::{self, Config, OutputFormat};
use litclock::app_controller::Controller;
use litclock::file_utils::FileManager;
use litclock::records::RecordSet;

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Csv,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape one book from its listing page URL
    Book {
        /// URL of the book's listing page
        #[arg(value_name = "URL")]
        url: String,

        /// Drop every record whose quote appears more than once
        #[arg(long)]
        dedup: bool,
    },

    /// Scrape every book listed in a file, one URL per line
    Batch {
        /// File of book URLs
        #[arg(value_name = "URL_FILE")]
        url_file: PathBuf,
    },

    /// Extract times from a local text file or a directory of .txt files
    Scan {
        /// Text file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Author recorded for scanned texts
        #[arg(short, long, default_value = "Unknown")]
        author: String,
    },

    /// Generate shell completions for litclock
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// litclock - times of day quoted from books
///
/// Finds every clock time a book mentions and exports it with the
/// surrounding sentences as a quotation.
#[derive(Parser, Debug)]
#[command(name = "litclock")]
#[command(version)]
#[command(about = "Collect literary clock quotations from books")]
#[command(long_about = "litclock pages through books on a reading site, finds every time of day the text mentions and exports each one with its quotation.

EXAMPLES:
    litclock book https://gemibook.com/231064-the-hobbit     # One book, CSV to stdout
    litclock -o hobbit.json --format json book <URL>          # One book as JSON
    litclock -o all.csv batch gemibook_urls.csv               # Every book in a list, deduplicated
    litclock scan ./texts --author \"Various\"                  # Local .txt files
    litclock completions bash > litclock.bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Output file or directory (stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<CliOutputFormat>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the max level set below does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "litclock", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone().into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let output = cli.output.clone();
    let format = config.output.format;

    let (records, input_name) = match cli.command {
        Commands::Book { url, dedup } => {
            let controller = Controller::with_config(config)?;
            let mut records = controller.scrape_book(&url).await?;
            if dedup {
                records.drop_duplicate_quotes();
            }
            (records, book_slug(&url))
        }
        Commands::Batch { url_file } => {
            let urls = FileManager::read_url_list(&url_file)?;
            info!("Scraping {} books from {:?}", urls.len(), url_file);
            let controller = Controller::with_config(config)?;
            (controller.scrape_many(&urls).await?, url_file.display().to_string())
        }
        Commands::Scan { path, author } => {
            let controller = Controller::with_config(config)?;
            (controller.scan_path(&path, &author)?, path.display().to_string())
        }
        Commands::Completions { .. } => return Err(anyhow!("unreachable command")),
    };

    write_records(&records, format, output.as_deref(), &input_name)
}

// Last path segment of a book URL, used to name exports
fn book_slug(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("book")
        .to_string()
}

// Helper function to write records to a file, a directory or stdout
fn write_records(records: &RecordSet, format: OutputFormat, output: Option<&Path>, input_name: &str) -> Result<()> {
    let rendered = records.render(format)?;

    match output {
        Some(path) => {
            let path = if FileManager::dir_exists(path) {
                FileManager::generate_output_path(input_name, path, format.extension())
            } else {
                path.to_path_buf()
            };
            FileManager::write_to_file(&path, &rendered)?;
            info!("Wrote {} records as {} to {:?}", records.len(), format, path);
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write records to stdout")?;
        }
    }

    Ok(())
}
