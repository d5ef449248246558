//! Append-only trace file with size-based rotation.
//!
//! When the active file grows past [`MAX_FILE_SIZE_BYTES`] it is renamed to
//! `<name>.<n>` (shifting older backups up by one) and a fresh file is started.
//! At most [`MAX_BACKUP_FILES`] backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files retained.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating line writer.
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    /// Opened lazily on the first write.
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails on filesystem errors or if a previous writer panicked while
    /// holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut slot = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            *slot = None;
            rotate(&self.path)?;
        }

        if slot.is_none() {
            *slot = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let file = slot
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file unavailable"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }
}

/// Shifts `path.1 .. path.N-1` up by one, drops the oldest, moves `path` to `path.1`.
fn rotate(path: &Path) -> io::Result<()> {
    let backup = |n: usize| {
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    };

    let oldest = backup(MAX_BACKUP_FILES);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..MAX_BACKUP_FILES).rev() {
        let from = backup(n);
        if from.exists() {
            fs::rename(&from, backup(n + 1))?;
        }
    }
    if path.exists() {
        fs::rename(path, backup(1))?;
    }
    Ok(())
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_caps_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limit(path.clone(), 4);

        for i in 0..8 {
            writer.write_line(&format!("line-{i}")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-7\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.1")).unwrap(), "line-6\n");
        assert!(dir.path().join("trace.json.3").exists());
        assert!(!dir.path().join("trace.json.4").exists());
    }
}
