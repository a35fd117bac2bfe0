//! Filesystem port for the few files `initgit` reads and writes.

use std::io;
use std::path::Path;

/// Reads and creates files inside the working directory.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Creates `path` with `contents` unless something is already there,
    /// making parent directories as needed.
    ///
    /// Returns `false`, leaving the file untouched, when it already existed.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the file existing.
    fn create(&self, path: &Path, contents: &str) -> io::Result<bool>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;
}
