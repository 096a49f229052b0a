//! Append-only run log mirrored to the console.
//!
//! Each message becomes one `[YYYY-MM-DD HH:MM:SS] <message>` record in the
//! log file (local time) and is echoed as-is to the console. Messages may span
//! several lines; they are written verbatim. The file is opened once per run
//! and never truncated.

use std::fs::{self, File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{io_err, SyncError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Journal {
    path: PathBuf,
    file: LineWriter<File>,
    echo: Box<dyn Write>,
}

impl Journal {
    /// Open `path` for appending, echoing to stdout.
    pub fn open(path: &Path) -> Result<Self, SyncError> {
        Self::with_echo(path, Box::new(io::stdout()))
    }

    /// Open `path` for appending, echoing to `echo`.
    pub fn with_echo(path: &Path, echo: Box<dyn Write>) -> Result<Self, SyncError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| io_err(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: LineWriter::new(file),
            echo,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one message.
    pub fn log(&mut self, message: &str) -> Result<(), SyncError> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(self.file, "[{stamp}] {message}").map_err(|e| io_err(&self.path, e))?;
        writeln!(self.echo, "{message}").map_err(|e| io_err("<console>", e))?;
        Ok(())
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        let _ = self.file.flush();
        let _ = self.echo.flush();
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
