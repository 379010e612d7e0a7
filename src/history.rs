//! Plain-text history persistence.
//!
//! The file holds one raw input line per entry. It is read once when an
//! interactive session starts and rewritten in full when the session ends;
//! nothing is written in between.

use crate::error::{Result, ShellError};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Line history persisted to a file between sessions.
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries in order, skipping blank lines.
    ///
    /// A missing file (and its parent directory) is created empty, so a first
    /// run is not an error.
    pub fn load(&self) -> Result<Vec<String>> {
        if let Some(parent) = self.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| self.io_error(e))?;
            if !line.trim().is_empty() {
                entries.push(line);
            }
        }
        log::info!("loaded {} history entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    /// Replace the file with `entries`, one per line.
    ///
    /// The entries go to a temporary file next to the target which is then
    /// renamed over it, so an interrupted save never leaves a truncated file.
    pub fn save<'a, I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let dir = self.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        let tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;

        let mut count = 0;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            for entry in entries {
                writeln!(writer, "{entry}").map_err(|e| self.io_error(e))?;
                count += 1;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        log::info!("saved {count} history entries to {}", self.path.display());
        Ok(count)
    }

    fn parent(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn io_error(&self, source: io::Error) -> ShellError {
        ShellError::HistoryIo {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".history");
        let history = HistoryFile::new(&path);

        assert!(history.load().unwrap().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryFile::new(dir.path().join(".history"));

        let written = history
            .save(["hello --name \"Jane Doe\"", "set name ann", "hello"])
            .unwrap();
        assert_eq!(written, 3);

        assert_eq!(
            history.load().unwrap(),
            vec!["hello --name \"Jane Doe\"", "set name ann", "hello"]
        );
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".history");
        fs::write(&path, "old one\nold two\n").unwrap();

        let history = HistoryFile::new(&path);
        history.save(["new"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".history");
        fs::write(&path, "one\n\n  \ntwo\n").unwrap();

        assert_eq!(HistoryFile::new(&path).load().unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_load_reports_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a history file.
        let err = HistoryFile::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ShellError::HistoryIo { .. }));
    }
}
