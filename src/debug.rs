//! Log bridge for the font-registry binary.
//!
//! Routes every `log::info!()` etc. call to stderr, or to a log file when one
//! is given. Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then
//! the config file `log_level` (applied after the config is loaded).

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use font_registry_config::LogLevel;
use parking_lot::Mutex;

enum Sink {
    Stderr,
    File(File),
}

/// `log::Log` implementation writing timestamped lines to one sink.
struct LogBridge {
    sink: Mutex<Sink>,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut sink = self.sink.lock();
        // Logging must never fail the caller.
        let _ = match &mut *sink {
            Sink::Stderr => std::io::stderr().write_all(line.as_bytes()),
            Sink::File(file) => file.write_all(line.as_bytes()),
        };
    }

    fn flush(&self) {
        if let Sink::File(file) = &mut *self.sink.lock() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Whether the level was fixed by the CLI or `RUST_LOG`.
static LEVEL_PINNED: OnceLock<bool> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Parse `RUST_LOG` as a plain level name. Module directives are ignored.
fn level_from_env() -> Option<LogLevel> {
    let value = std::env::var("RUST_LOG").ok()?;
    value
        .split(',')
        .filter(|part| !part.contains('='))
        .find_map(|part| part.parse().ok())
}

/// Install the log bridge. Only the first call has any effect.
///
/// If `log_file` cannot be created, output falls back to stderr.
pub fn init_log_bridge(cli_level: Option<LogLevel>, log_file: Option<&Path>) {
    let pinned = cli_level.or_else(level_from_env);
    let _ = LEVEL_PINNED.set(pinned.is_some());

    let mut file_error = None;
    let sink = match log_file.map(File::create) {
        Some(Ok(file)) => Sink::File(file),
        Some(Err(e)) => {
            file_error = Some(e);
            Sink::Stderr
        }
        None => Sink::Stderr,
    };

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        sink: Mutex::new(sink),
    });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(pinned.unwrap_or_default().to_level_filter());
    }

    if let Some(e) = file_error {
        log::warn!("Could not open log file, logging to stderr: {}", e);
    }
}

/// Apply the config file level unless the CLI or `RUST_LOG` already set one.
pub fn apply_config_level(level: LogLevel) {
    if !LEVEL_PINNED.get().copied().unwrap_or(false) {
        log::set_max_level(level.to_level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = get_timestamp();
        let (secs, micros) = ts.split_once('.').unwrap();
        assert!(secs.parse::<u64>().is_ok());
        assert_eq!(micros.len(), 6);
    }
}
