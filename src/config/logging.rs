//! Logging configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format of the `tracing` subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Severity threshold, ordered from most to least verbose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn rank(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `text` for humans, `json` for log shippers
    pub format: LogFormat,
    /// Minimum level; `-v` flags can only raise it
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: LogLevel::Info,
        }
    }
}

impl LoggingConfig {
    /// Level after applying `-v` flags from the command line.
    ///
    /// Each flag raises verbosity by one step; the configured level is the floor.
    pub fn effective_level(&self, verbose: u8) -> LogLevel {
        let from_flags = match verbose {
            0 => return self.level.clone(),
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        if from_flags.rank() > self.level.rank() {
            from_flags
        } else {
            self.level.clone()
        }
    }

    /// Filter directive for `tracing_subscriber::EnvFilter`.
    ///
    /// Quiets the HTTP stack below `info` unless tracing everything.
    pub fn filter_directive(&self, verbose: u8) -> String {
        let level = self.effective_level(verbose);
        match level {
            LogLevel::Trace => "trace".to_string(),
            other => format!("{},hyper=info,reqwest=info", other),
        }
    }
}
