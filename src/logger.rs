//! Ring-buffer log sink for the Events tab.
//!
//! The alternate screen makes stderr useless, so the global `log` facade
//! is pointed at an in-memory ring buffer the UI renders instead.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};

const MAX_ENTRIES: usize = 500;

/// A single captured log line.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

impl LogEntry {
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self.level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Cyan,
            Level::Debug | Level::Trace => Color::DarkGray,
        }
    }
}

struct RingLogger {
    entries: Mutex<VecDeque<LogEntry>>,
}

impl log::Log for RingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(LogEntry {
                timestamp: Local::now(),
                level: record.level(),
                message: record.args().to_string(),
            });
            while entries.len() > MAX_ENTRIES {
                entries.pop_front();
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: RingLogger = RingLogger {
    entries: Mutex::new(VecDeque::new()),
};

/// Install the ring buffer as the global logger. Safe to call once at
/// startup; a second call is a no-op.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Parse a log level string (case-insensitive), falling back to Info.
pub fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" | "err" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Snapshot of the captured entries, oldest first (for the Events tab).
pub fn entries() -> Vec<LogEntry> {
    LOGGER
        .entries
        .lock()
        .map(|e| e.iter().cloned().collect())
        .unwrap_or_default()
}

/// Drop all captured entries.
pub fn clear() {
    if let Ok(mut entries) = LOGGER.entries.lock() {
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// These tests share the global ring buffer, so they run serially.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn captures_messages() {
        let _lock = TEST_MUTEX.lock().unwrap();
        init(LevelFilter::Info);
        clear();

        log::info!("selected Wi-Fi");

        let logs = entries();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "selected Wi-Fi");
        assert_eq!(logs[0].level, Level::Info);
    }

    #[test]
    fn ring_buffer_is_bounded() {
        let _lock = TEST_MUTEX.lock().unwrap();
        init(LevelFilter::Info);
        clear();

        for i in 0..(MAX_ENTRIES + 100) {
            log::info!("message {i}");
        }

        let logs = entries();
        assert_eq!(logs.len(), MAX_ENTRIES);
        // Oldest entries were dropped
        assert_eq!(logs[0].message, "message 100");
    }

    #[test]
    fn level_strings_parse() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("bogus"), LevelFilter::Info);
    }
}
