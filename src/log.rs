use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub host: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

/// Append-only fetch activity log under `~/.qget/activity.log`.
///
/// Used by the CLI to record each fetch outcome; the library fetch path
/// itself never writes here.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> crate::Result<Self> {
        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            crate::QgetError::Other("could not determine home directory".into())
        })?;
        let qget_dir = user_dirs.home_dir().join(".qget");
        fs::create_dir_all(&qget_dir)?;

        Ok(Self {
            log_path: qget_dir.join("activity.log"),
        })
    }

    pub fn log(
        &self,
        level: LogLevel,
        host: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            host: host.map(|h| h.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let level_str = match entry.level {
            LogLevel::Info => "🟢",
            LogLevel::Error => "🔴",
        };

        let host_str = entry.host.as_deref().unwrap_or("*");
        let details_str = entry.details.as_deref().unwrap_or("");

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level_str,
            entry.event,
            host_str,
            details_str
        )?;

        Ok(())
    }

    pub fn read_logs(
        &self,
        host_filter: Option<&str>,
        errors_only: bool,
    ) -> crate::Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let file = std::fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);
        let mut matching_lines = Vec::new();

        for line in reader.lines() {
            let line = line?;

            if errors_only && !line.contains("🔴") {
                continue;
            }

            if let Some(host) = host_filter {
                if !line.contains(host) {
                    continue;
                }
            }

            matching_lines.push(line);
        }

        // Most recent entries first
        matching_lines.reverse();
        Ok(matching_lines)
    }

    pub fn info(&self, host: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Info, host, event, details)
    }

    pub fn error(
        &self,
        host: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.log(LogLevel::Error, host, event, details)
    }
}
