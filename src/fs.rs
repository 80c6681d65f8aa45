//! File access used by the orchestrator.
//!
//! [`FileSystem`] is the only way the sync pass touches disk, which keeps
//! the write-if-changed policy testable without a real workspace.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Minimal file access needed to sync a workspace.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Write `new_text` to `path` only when it differs from `original`.
///
/// Returns whether a write happened.
pub fn write_if_changed(
    fs: &dyn FileSystem,
    path: &Path,
    original: &str,
    new_text: &str,
) -> io::Result<bool> {
    if original == new_text {
        return Ok(false);
    }
    fs.write(path, new_text)?;
    Ok(true)
}

/// The real file system. Writes are atomic (tempfile + fsync + rename).
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        atomic_write(path, contents.as_bytes())
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the file keeps its old contents.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    // Create tempfile in same directory to ensure same filesystem
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Keep the permissions of the file being replaced
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod memory {
    use super::FileSystem;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory file system that counts writes.
    #[derive(Debug, Default)]
    pub struct MemoryFs {
        files: RefCell<HashMap<PathBuf, String>>,
        writes: Cell<usize>,
    }

    impl MemoryFs {
        pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
            self.files.borrow_mut().insert(path.into(), contents.to_string());
            self
        }

        pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.borrow().get(path.as_ref()).cloned()
        }

        pub fn writes(&self) -> usize {
            self.writes.get()
        }
    }

    impl FileSystem for MemoryFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.contents(path)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            self.writes.set(self.writes.get() + 1);
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }
}
