//! tracing subscriber setup: durable log file plus optional console mirror

use crate::types::SyncError;
use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Where and how much to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Log file, appended to; its directory is created if missing
    pub log_file: PathBuf,

    /// Mirror every line to stdout
    pub console: bool,

    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("replika.log"),
            console: true,
            level: "info".to_string(),
        }
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process: dropping it
/// flushes whatever the background writer still holds.
pub fn init(settings: &LogSettings) -> Result<WorkerGuard, SyncError> {
    let (dir, file_name) = split_log_path(&settings.log_file)?;
    fs::create_dir_all(&dir)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| {
            SyncError::Config(format!("Invalid log level '{}': {}", settings.level, e))
        })?,
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .map_err(|e| SyncError::Logging(format!("Cannot open log file: {}", e)))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_writer(file_writer)
        .with_ansi(false);

    let console_layer = settings.console.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(std::io::stdout)
            .with_ansi(console::colors_enabled())
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| SyncError::Logging(e.to_string()))?;

    Ok(guard)
}

fn split_log_path(log_file: &Path) -> Result<(PathBuf, String), SyncError> {
    let file_name = log_file.file_name().ok_or_else(|| {
        SyncError::Config(format!("Log file path has no file name: {:?}", log_file))
    })?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_string_lossy().into_owned()))
}

/// `2024-05-01 12:00:00,123 - INFO - message`
pub(crate) struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = *event.metadata().level();
        let label = level_label(level);
        write!(writer, "{} - ", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))?;
        if writer.has_ansi_escapes() {
            let styled = match level {
                Level::ERROR => console::style(label).red(),
                Level::WARN => console::style(label).yellow(),
                _ => console::style(label).green(),
            };
            write!(writer, "{} - ", styled.force_styling(true))?;
        } else {
            write!(writer, "{} - ", label)?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_label(level: Level) -> &'static str {
    if level == Level::WARN {
        "WARNING"
    } else {
        level.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{SyncLog, TracingLog};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_writer(move || writer.clone())
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_line_format_levels() {
        let output = capture(|| {
            TracingLog.info("Copied/Updated: a.txt");
            TracingLog.warn("Skipped symlink: link");
            TracingLog.error("Error deleting x: busy");
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3, "got: {output}");
        assert!(lines[0].ends_with(" - INFO - Copied/Updated: a.txt"));
        assert!(lines[1].ends_with(" - WARNING - Skipped symlink: link"));
        assert!(lines[2].ends_with(" - ERROR - Error deleting x: busy"));
    }

    #[test]
    fn test_line_format_timestamp_prefix() {
        let output = capture(|| TracingLog.info("hello"));
        let line = output.lines().next().unwrap();
        // "YYYY-MM-DD HH:MM:SS,mmm - "
        assert_eq!(&line[4..5], "-");
        assert_eq!(&line[19..20], ",");
        assert_eq!(&line[23..26], " - ");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("logs/sync.log")).unwrap();
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, "sync.log");

        let (dir, name) = split_log_path(Path::new("sync.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "sync.log");
    }

    #[test]
    fn test_split_log_path_rejects_bare_root() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
