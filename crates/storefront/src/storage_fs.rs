//! File-backed storage port implementation.
//!
//! One file per record key under the configured data directory, the
//! Rust-side stand-in for the browser's local storage the original demo
//! persisted to. Writes go through a temp file and an atomic rename so a
//! crash never leaves a half-written record. There is no locking: two
//! processes pointed at the same directory race with last-writer-wins,
//! exactly like two browser tabs sharing one local storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use orchard_core::storage::Storage;

/// File-per-key storage rooted at a data directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if missing) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers (see orchard_core::storage::keys),
        // never user input.
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read record, treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = write_atomically(&self.dir, &self.record_path(key), value) {
            tracing::warn!(key, error = %err, "failed to write record");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(key, error = %err, "failed to remove record"),
        }
    }
}

/// Write through a temp file in the same directory, then rename over the
/// target so readers never observe a partial record.
fn write_atomically(dir: &Path, target: &Path, value: &str) -> io::Result<()> {
    let name = target.file_name().and_then(|n| n.to_str()).unwrap_or("record");
    let tmp = dir.join(format!(".{name}.tmp"));
    fs::write(&tmp, value)?;
    fs::rename(&tmp, target)
}
