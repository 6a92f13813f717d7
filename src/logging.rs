//! Structured logging for the weather fetch service.
//!
//! Provides leveled logging tagged with the originating component and,
//! where known, the reporting station. Supports console output and an
//! optional log file for long-running sessions. Fetch outcomes never
//! reach the original caller, so the log is the only place failures
//! become visible.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Log Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The aviationweather.gov dataserver and everything talking to it.
    Awc,
    /// The request scheduler.
    Sched,
    /// Everything else, including the worker boundary.
    Sys,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Awc => write!(f, "AWC"),
            DataSource::Sched => write!(f, "SCHED"),
            DataSource::Sys => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - no station in range, service briefly unavailable
    Expected,
    /// Unexpected failure - network breakage or service degradation
    Unexpected,
    /// Unknown - cannot determine whether the request or the service is at fault
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: DataSource, station: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let station_part = station.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, station_part, message
        );

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("✗ {}{}: {}", source, station_part, message),
                LogLevel::Warning => eprintln!("⚠ {}{}: {}", source, station_part, message),
                LogLevel::Info => println!("{}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Log a general informational message
pub fn info(source: DataSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, source, station, message);
    }
}

/// Log a warning message
pub fn warn(source: DataSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, source, station, message);
    }
}

/// Log an error message
pub fn error(source: DataSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, source, station, message);
    }
}

/// Log a debug message
pub fn debug(source: DataSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, source, station, message);
    }
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a fetch failure.
///
/// Transport breakage and server-side HTTP errors indicate degradation
/// somewhere between us and the service. A 4xx status or an explicit
/// error payload may equally mean our query was malformed, so those
/// stay unclassified.
pub fn classify_fetch_failure(err: &FetchError) -> FailureType {
    match err {
        FetchError::Transport(_) => FailureType::Unexpected,
        FetchError::Http(status) if *status >= 500 => FailureType::Unexpected,
        FetchError::Http(_) => FailureType::Unknown,
        FetchError::Service(_) => FailureType::Unknown,
    }
}

/// Log a fetch failure with automatic classification
pub fn log_fetch_failure(station: Option<&str>, operation: &str, err: &FetchError) {
    let failure_type = classify_fetch_failure(err);

    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(DataSource::Awc, station, &message),
        FailureType::Unexpected => error(DataSource::Awc, station, &message),
        FailureType::Unknown => warn(DataSource::Awc, station, &message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_failure_classification() {
        let transport = FetchError::Transport("connection reset".to_string());
        assert_eq!(classify_fetch_failure(&transport), FailureType::Unexpected);

        let server_error = FetchError::Http(503);
        assert_eq!(classify_fetch_failure(&server_error), FailureType::Unexpected);

        let client_error = FetchError::Http(400);
        assert_eq!(classify_fetch_failure(&client_error), FailureType::Unknown);

        let service = FetchError::Service("Query must be constrained by time".to_string());
        assert_eq!(classify_fetch_failure(&service), FailureType::Unknown);
    }
}
