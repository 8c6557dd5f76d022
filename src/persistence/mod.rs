//! Save/load storage backends
//!
//! Features:
//! - `Storage` trait over whole-document reads and writes
//! - `FileStorage` writing through a temp file and rename
//! - `MemoryStorage` for tests and headless runs

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A single persisted document
pub trait Storage {
    /// Read the stored document. A missing document is `Ok(None)`.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the stored document
    fn write(&self, contents: &str) -> io::Result<()>;
}

/// Document stored in a file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        // tmp → rename so a crash mid-write never leaves a truncated file
        let tmp = self.tmp_path();
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)
    }
}

/// In-memory document, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Rc::new(RefCell::new(Some(contents.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sky_hop_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_file_storage_missing_is_none() {
        let storage = FileStorage::new(temp_path("storage_missing"));
        let _ = std::fs::remove_file(storage.path());
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_then_read() {
        let storage = FileStorage::new(temp_path("storage_write"));
        storage.write("{\"high_score\": 7}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{\"high_score\": 7}"));
        assert!(!storage.tmp_path().exists());
        let _ = std::fs::remove_file(storage.path());
    }

    #[test]
    fn test_file_storage_write_into_missing_dir_fails() {
        let storage = FileStorage::new(
            std::env::temp_dir()
                .join("sky_hop_no_such_dir_for_tests")
                .join("score.json"),
        );
        assert!(storage.write("{}").is_err());
    }

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("hello").unwrap();
        assert_eq!(other.read().unwrap().as_deref(), Some("hello"));
    }
}
