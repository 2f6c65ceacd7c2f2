//! Directory-backed example store

use super::ExampleStore;
use crate::error::{SnapError, SnapResult};
use sha2::{Digest, Sha384};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Hex characters of the SHA-384 digest used for file and directory names
const NAME_LEN: usize = 16;

/// Hash bytes with SHA-384, returning the first 16 hex chars
fn hashed_name(bytes: &[u8]) -> String {
    let digest = Sha384::digest(bytes);
    let mut name = hex::encode(digest);
    name.truncate(NAME_LEN);
    name
}

/// Example store rooted at a local directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`. The directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_dir(&self, key: &[u8]) -> PathBuf {
        self.root.join(hashed_name(key))
    }

    fn value_path(&self, key: &[u8], value: &[u8]) -> PathBuf {
        self.key_dir(key).join(hashed_name(value))
    }
}

impl ExampleStore for DirectoryStore {
    fn fetch(&self, key: &[u8]) -> SnapResult<Vec<Vec<u8>>> {
        let dir = self.key_dir(key);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SnapError::io(
                    format!("listing values in {}", dir.display()),
                    e,
                ))
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut values = Vec::with_capacity(paths.len());
        for path in paths {
            match fs::read(&path) {
                Ok(value) => values.push(value),
                // Concurrent deletes are expected
                Err(e) => debug!("Skipping unreadable value {}: {}", path.display(), e),
            }
        }

        debug!("Fetched {} values from {}", values.len(), dir.display());
        Ok(values)
    }

    fn save(&self, key: &[u8], value: &[u8]) -> SnapResult<()> {
        let dir = self.key_dir(key);
        fs::create_dir_all(&dir)
            .map_err(|e| SnapError::io(format!("creating key directory {}", dir.display()), e))?;

        let path = self.value_path(key, value);
        if path.exists() {
            return Ok(());
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| SnapError::io("creating temporary value file", e))?;
        tmp.write_all(value)
            .map_err(|e| SnapError::io("writing temporary value file", e))?;
        tmp.persist(&path).map_err(|e| {
            SnapError::io(format!("moving value into {}", path.display()), e.error)
        })?;
        Ok(())
    }

    fn delete(&self, key: &[u8], value: &[u8]) -> SnapResult<()> {
        let path = self.value_path(key, value);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnapError::io(format!("removing {}", path.display()), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn hashed_name_is_truncated_sha384() {
        // sha384("") = 38b060a751ac9638...
        assert_eq!(hashed_name(b""), "38b060a751ac9638");
        assert_eq!(hashed_name(b"key").len(), NAME_LEN);
    }

    #[test]
    fn missing_key_fetches_empty() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp.path().join("not-created"));
        assert!(store.fetch(b"absent").unwrap().is_empty());
    }

    #[test]
    fn save_fetch_delete() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp.path());

        store.save(b"key", b"one").unwrap();
        store.save(b"key", b"two").unwrap();
        store.save(b"key", b"one").unwrap();

        let mut values = store.fetch(b"key").unwrap();
        values.sort();
        assert_eq!(values, vec![b"one".to_vec(), b"two".to_vec()]);

        store.delete(b"key", b"one").unwrap();
        assert_eq!(store.fetch(b"key").unwrap(), vec![b"two".to_vec()]);
    }

    #[test]
    fn delete_missing_value_is_ok() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp.path());
        store.delete(b"key", b"never-saved").unwrap();
    }

    #[test]
    fn reads_layout_written_elsewhere() {
        let temp = TempDir::new().unwrap();
        let key_dir = temp.path().join(hashed_name(b"test-key"));
        fs::create_dir_all(&key_dir).unwrap();
        fs::write(key_dir.join(hashed_name(b"example")), b"example").unwrap();

        let store = DirectoryStore::new(temp.path());
        assert_eq!(store.fetch(b"test-key").unwrap(), vec![b"example".to_vec()]);
    }

    #[test]
    fn non_value_entries_are_skipped() {
        let temp = TempDir::new().unwrap();
        let key_dir = temp.path().join(hashed_name(b"key"));
        fs::create_dir_all(key_dir.join("nested")).unwrap();
        fs::write(key_dir.join(hashed_name(b"value")), b"value").unwrap();

        let store = DirectoryStore::new(temp.path());
        assert_eq!(store.fetch(b"key").unwrap(), vec![b"value".to_vec()]);
    }

    #[test]
    fn keys_are_isolated() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryStore::new(temp.path());
        store.save(b"a", b"value-a").unwrap();
        assert!(store.fetch(b"b").unwrap().is_empty());
    }
}
