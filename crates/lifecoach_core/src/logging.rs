//! Process-wide rotating file logs.
//!
//! # Responsibility
//! - Start one flexi_logger backend per process from a level and directory.
//! - Route panics through the log before the previous hook runs.
//!
//! # Invariants
//! - Repeating [`init_logging`] with the same level and directory is a no-op.
//! - A different level or directory fails with [`LoggingError::AlreadyRunning`].
//! - Lines read `event=<name> module=<area> status=<ok|error|...>` and carry
//!   ids and counts only, never document bodies or user-entered text.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Once;

const FILE_BASENAME: &str = "lifecoach";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const ROTATED_FILES_KEPT: usize = 5;
const PANIC_MESSAGE_MAX_CHARS: usize = 160;

static LOGGER: OnceCell<RunningLogger> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::Trace,
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warn => LevelFilter::Warn,
            Self::Error => LevelFilter::Error,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    /// Case-insensitive; `warning` is accepted for `warn`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LoggingError::UnknownLevel(value.trim().to_string())),
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    /// Empty or relative log directory.
    BadDirectory(String),
    CreateDirectory {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logging already runs with different settings.
    AlreadyRunning {
        level: LogLevel,
        dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}` (use trace, debug, info, warn or error)"
            ),
            Self::BadDirectory(dir) => write!(f, "log directory must be absolute, got `{dir}`"),
            Self::CreateDirectory { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "logger backend failed: {err}"),
            Self::AlreadyRunning { level, dir } => write!(
                f,
                "logging already running at level {level} in `{}`",
                dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

struct RunningLogger {
    level: LogLevel,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts logging to rotating files in `log_dir`.
///
/// `log_dir` must be absolute and is created when missing.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let level: LogLevel = level.parse()?;
    let trimmed = log_dir.trim();
    let dir = Path::new(trimmed);
    if trimmed.is_empty() || !dir.is_absolute() {
        return Err(LoggingError::BadDirectory(trimmed.to_string()));
    }

    let running = LOGGER.get_or_try_init(|| start(level, dir))?;
    if running.level != level || running.dir != dir {
        return Err(LoggingError::AlreadyRunning {
            level: running.level,
            dir: running.dir.clone(),
        });
    }
    Ok(())
}

/// Level and directory of the running logger, if any.
pub fn logging_status() -> Option<(LogLevel, PathBuf)> {
    LOGGER
        .get()
        .map(|running| (running.level, running.dir.clone()))
}

/// `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

fn start(level: LogLevel, dir: &Path) -> Result<RunningLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
        dir: dir.to_path_buf(),
        source,
    })?;

    let spec = LogSpecification::builder().default(level.filter()).build();
    let handle = Logger::with(spec)
        .log_to_file(FileSpec::default().directory(dir).basename(FILE_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(ROTATED_FILES_KEPT),
        )
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    PANIC_HOOK.call_once(install_panic_hook);
    info!(
        "event=logging_init module=core status=ok level={level} os={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(RunningLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), |location| location.to_string());
        error!(
            "event=panic module=core status=error location={location} message={}",
            single_line(panic_message(info.payload()), PANIC_MESSAGE_MAX_CHARS)
        );
        previous(info);
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

/// Joins `value` onto one line, cut to `max_chars` with a trailing `...`.
fn single_line(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars().map(|ch| match ch {
        '\n' | '\r' => ' ',
        other => other,
    });
    let mut out: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}
