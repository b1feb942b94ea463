//! Rolling Logger
//!
//! A `log` sink that keeps the most recent records in a circular buffer and
//! echoes each one to the browser console (stderr off the web).
//! The buffer is the page's diagnostic channel: failed refreshes end up here
//! even when nothing is shown to the user. `dump` renders it for whoever
//! the host page hands it to.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of records kept
pub const DEFAULT_CAPACITY: usize = 200;

/// One captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<5} {} {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

pub struct RollingLogger {
    capacity: usize,
    level: LevelFilter,
    echo: bool,
    records: Mutex<VecDeque<LogRecord>>,
}

impl RollingLogger {
    pub fn new(capacity: usize, level: LevelFilter) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            level,
            echo: true,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Keep records without echoing them
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Install as the global logger for the rest of the process
    pub fn install(self) -> Result<&'static RollingLogger, SetLoggerError> {
        let level = self.level;
        let logger: &'static RollingLogger = Box::leak(Box::new(self));
        log::set_logger(logger)?;
        log::set_max_level(level);
        Ok(logger)
    }

    /// Buffered records at `level` or more severe, oldest first
    pub fn at_least(&self, level: Level) -> Vec<LogRecord> {
        self.lock().iter().filter(|r| r.level <= level).cloned().collect()
    }

    /// One line per buffered record at `level` or more severe
    pub fn dump(&self, level: Level) -> String {
        self.at_least(level).iter().map(LogRecord::to_string).collect::<Vec<_>>().join("\n")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<LogRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, record: LogRecord) {
        let mut records = self.lock();
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogRecord {
            timestamp: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        if self.echo {
            echo(&entry);
        }
        self.push(entry);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn echo(entry: &LogRecord) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(&entry.message);
    match entry.level {
        Level::Error => console::error_1(&line),
        Level::Warn => console::warn_1(&line),
        Level::Info => console::info_1(&line),
        Level::Debug | Level::Trace => console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(entry: &LogRecord) {
    eprintln!("{}", entry);
}
