use crate::shared::constants;
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// stdout belongs to the bar scripts, so everything goes to files.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// `debug.log` gets every line, `error.log` only errors and panics.
#[derive(Debug, Clone)]
struct LogFiles {
    error: PathBuf,
    debug: PathBuf,
}

impl LogFiles {
    /// Truncates both files and writes a start header.
    fn create(dir: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        let files = Self {
            error: dir.join(constants::ERROR_LOG_FILE),
            debug: dir.join(constants::DEBUG_LOG_FILE),
        };
        let header = format!("=== {} started {} ===", constants::APP_NAME, chrono::Local::now());
        fs::write(&files.error, format!("{}\n", header))?;
        fs::write(&files.debug, format!("{}\n", header))?;
        Ok(files)
    }

    fn write(&self, level: Level, msg: &str) {
        let line = format_line(level, msg);
        append(&self.debug, &line);
        if level == Level::Error {
            append(&self.error, &line);
        }
    }
}

lazy_static! {
    static ref LOG_FILES: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn format_line(level: Level, msg: &str) -> String {
    format!("[{}][{}] {}", chrono::Local::now().format("%H:%M:%S%.3f"), level.tag(), msg)
}

fn append(path: &Path, text: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", text);
    }
}

/// Starts the log files in `log_dir` and installs the panic hook.
///
/// Logging stays a no-op when the directory can't be written.
pub fn init(log_dir: &Path) {
    let Ok(files) = LogFiles::create(log_dir) else {
        return;
    };
    if let Ok(mut guard) = LOG_FILES.lock() {
        *guard = Some(files.clone());
    }

    panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        let msg = match info.location() {
            Some(l) => format!("panicked at {}:{}: {}", l.file(), l.line(), payload),
            None => format!("panicked: {}", payload),
        };
        files.write(Level::Error, &format!("{}\n{}", msg, Backtrace::capture()));
        eprintln!("{}: {} (see {})", constants::APP_NAME, msg, files.error.display());
    }));
}

pub fn log(level: Level, msg: &str) {
    if let Ok(guard) = LOG_FILES.lock() {
        if let Some(files) = guard.as_ref() {
            files.write(level, msg);
        }
    }
}

pub fn info(msg: &str) {
    log(Level::Info, msg);
}

pub fn warn(msg: &str) {
    log(Level::Warn, msg);
}

pub fn error(msg: &str) {
    log(Level::Error, msg);
}

pub fn debug(msg: &str) {
    log(Level::Debug, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = format_line(Level::Warn, "corrupt cache");
        assert!(line.ends_with("][WARN] corrupt cache"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_errors_reach_both_files() {
        let dir = std::env::temp_dir().join("barhue_test_logger");
        let files = LogFiles::create(&dir).unwrap();
        files.write(Level::Info, "decoded 20x20 image");
        files.write(Level::Error, "no colors: image is empty");

        let debug = fs::read_to_string(&files.debug).unwrap();
        let error = fs::read_to_string(&files.error).unwrap();
        assert!(debug.contains("[INFO] decoded 20x20 image"));
        assert!(debug.contains("[ERROR] no colors: image is empty"));
        assert!(!error.contains("decoded"));
        assert!(error.contains("[ERROR] no colors: image is empty"));

        // a new run starts from a clean file
        let files = LogFiles::create(&dir).unwrap();
        assert_eq!(fs::read_to_string(&files.debug).unwrap().lines().count(), 1);
    }
}
