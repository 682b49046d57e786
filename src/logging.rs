//! Line-oriented backend for the `log` facade.
//!
//! The `shapes` subcommand logs to stderr. Terminal play owns the screen, so
//! it only logs when `POLYFALL_LOG_FILE` names a file. `POLYFALL_LOG` sets the
//! level (`off`, `error`, `warn`, `info`, `debug`, `trace`; default `warn`).

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parse a level name; missing or unknown names give [`DEFAULT_LEVEL`]
pub fn level_from_str(s: Option<&str>) -> LevelFilter {
    s.and_then(|s| LevelFilter::from_str(s.trim()).ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Writes `[LEVEL target] message` lines to any writer
pub struct LineLogger<W> {
    level: LevelFilter,
    out: Mutex<W>,
}

impl<W: Write + Send> LineLogger<W> {
    pub fn new(level: LevelFilter, out: W) -> Self {
        Self {
            level,
            out: Mutex::new(out),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Log for LineLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            // Logging must never take the program down.
            let _ = writeln!(
                out,
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Install `logger` as the global logger; fails if one is already set
pub fn install<W: Write + Send + 'static>(logger: LineLogger<W>) -> Result<()> {
    let level = logger.level();
    log::set_logger(Box::leak(Box::new(logger))).map_err(|e| anyhow!("{}", e))?;
    log::set_max_level(level);
    Ok(())
}

pub fn init_stderr(level: LevelFilter) -> Result<()> {
    install(LineLogger::new(level, io::stderr()))
}

pub fn init_file(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    install(LineLogger::new(level, file))
}
