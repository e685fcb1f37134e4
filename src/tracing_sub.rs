//! Log routing for the picker.
//!
//! Events go to the in-memory debug log when one is reachable so they never
//! scribble over the alternate screen, and to stderr before that.

use std::io::{self, Write};
use std::str::FromStr;

use tracing::Level;

use crate::components::debug_log::{DebugLogHandle, DebugLogWriter, global_debug_log};

/// Environment variable holding the maximum level (`error` .. `trace`).
pub const LOG_LEVEL_ENV: &str = "TIMEPICKER_LOG";

/// Writer for one formatted event: a debug log line sink or stderr.
pub enum LogSink {
    DebugLog(DebugLogWriter),
    Stderr(io::Stderr),
}

impl LogSink {
    pub fn for_log(handle: Option<DebugLogHandle>) -> Self {
        match handle {
            Some(handle) => Self::DebugLog(handle.writer()),
            None => Self::Stderr(io::stderr()),
        }
    }

    pub fn is_debug_log(&self) -> bool {
        matches!(self, Self::DebugLog(_))
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::DebugLog(w) => w.write(buf),
            Self::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::DebugLog(w) => w.flush(),
            Self::Stderr(s) => s.flush(),
        }
    }
}

/// Picks a [`LogSink`] per event.
///
/// A pinned handle always wins. Otherwise the global debug log is looked up
/// on every event, so lines logged before it is installed still reach stderr.
#[derive(Clone, Debug, Default)]
pub struct PickerMakeWriter {
    pinned: Option<DebugLogHandle>,
}

impl PickerMakeWriter {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn pinned(handle: DebugLogHandle) -> Self {
        Self {
            pinned: Some(handle),
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for PickerMakeWriter {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        LogSink::for_log(self.pinned.clone().or_else(global_debug_log))
    }
}

/// Parse a level name, falling back to `DEBUG` when absent or unknown.
pub fn level_from(value: Option<&str>) -> Level {
    value
        .and_then(|v| Level::from_str(v.trim()).ok())
        .unwrap_or(Level::DEBUG)
}

fn subscriber(
    level: Level,
    writer: PickerMakeWriter,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .finish()
}

/// Install the global subscriber at `level`. Later calls are no-ops.
pub fn init_with_level(level: Level) {
    let global = subscriber(level, PickerMakeWriter::global());
    let _ = tracing::subscriber::set_global_default(global);
}

/// Install the global subscriber, level taken from [`LOG_LEVEL_ENV`].
pub fn init_default() {
    let level = level_from(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    init_with_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn sink_follows_the_handle() {
        assert!(LogSink::for_log(Some(DebugLogHandle::new(4))).is_debug_log());
        assert!(!LogSink::for_log(None).is_debug_log());
    }

    #[test]
    fn pinned_writer_collects_event_lines() {
        let handle = DebugLogHandle::new(16);
        let make = PickerMakeWriter::pinned(handle.clone());
        assert!(make.make_writer().is_debug_log());

        tracing::subscriber::with_default(subscriber(Level::INFO, make), || {
            tracing::info!(face = "24", "picker shown");
            tracing::debug!("below the level");
        });
        let lines = handle.tail(16);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("picker shown"));
        assert!(lines[0].contains("face=\"24\""));
    }

    #[test]
    fn level_names_parse_with_debug_fallback() {
        assert_eq!(level_from(Some("trace")), Level::TRACE);
        assert_eq!(level_from(Some(" WARN ")), Level::WARN);
        assert_eq!(level_from(Some("loud")), Level::DEBUG);
        assert_eq!(level_from(None), Level::DEBUG);
    }
}
