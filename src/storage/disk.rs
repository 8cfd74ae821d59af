use super::backend::{StorageBackend, StorageError};

use bytes::Bytes;
use parking_lot::RwLock;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Disk tier: one file per document key under `root`.
///
/// Reads share the lock, writes and deletes take it exclusively, so a reader
/// never sees a half-written file produced by this store.
pub struct FileStore {
    root: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            lock: RwLock::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Keys become file names, so anything that is not a single plain
    // component (separators, `.`, `..`, NUL) is refused.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None)
                if name == key && !key.contains(['/', '\\', '\0']) =>
            {
                Ok(self.root.join(name))
            }
            _ => Err(StorageError::InvalidKey(key.to_string())),
        }
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.read();
        match fs::read(&path) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: Bytes) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.write();
        fs::write(&path, &value)?;
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.write();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

impl fmt::Display for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiskStore pointing at -> {}", self.root.display())
    }
}
