//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Filesystem adapter backed by real disk I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn create(&self, path: &Path, contents: &str) -> io::Result<bool> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // create_new fails atomically if the file appeared in the meantime.
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e),
        };
        file.write_all(contents.as_bytes())?;
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
