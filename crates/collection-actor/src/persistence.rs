//! # Collection Files
//!
//! A [`JsonCollection`] is the on-disk half of a `ResourceActor`: one JSON file holding
//! an array of records. The whole array is read on every operation and the whole array
//! is written back after every mutation.
//!
//! Writes go to a temporary file in the same directory which is flushed, synced and
//! then renamed over the target, so a crash mid-write leaves either the old or the new
//! collection on disk, never a truncated one.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Failures reading or writing a collection file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file or its directory could not be read, created or replaced.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but does not hold a valid collection.
    #[error("Corrupt collection file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory collection could not be encoded.
    #[error("Failed to encode collection for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking task running the file operation panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Task(String),
}

/// A JSON array of `T` stored in a single file.
pub struct JsonCollection<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCollection")
            .field("path", &self.path)
            .finish()
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole collection.
    ///
    /// A missing file is created holding `[]` and an empty collection is returned.
    /// A file holding only whitespace also reads as empty.
    pub fn read(&self) -> Result<Vec<T>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.create_empty()?;
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Serializes `items` and atomically replaces the collection file.
    pub fn write(&self, items: &[T]) -> Result<(), StorageError> {
        let mut bytes = serde_json::to_vec_pretty(items).map_err(|source| StorageError::Encode {
            path: self.path.clone(),
            source,
        })?;
        bytes.push(b'\n');

        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        temp.write_all(&bytes).map_err(|e| self.io_error(e))?;
        temp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        temp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), records = items.len(), "Collection written");
        Ok(())
    }

    fn create_empty(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.parent_dir()).map_err(|e| self.io_error(e))?;

        // create_new so a file that appeared since the failed read is left alone
        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(mut file) => {
                file.write_all(b"[]\n").map_err(|e| self.io_error(e))?;
                file.sync_all().map_err(|e| self.io_error(e))?;
                info!(path = %self.path.display(), "Created empty collection file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    /// [`read`](Self::read) on Tokio's blocking pool.
    pub async fn load(&self) -> Result<Vec<T>, StorageError> {
        let collection = self.clone();
        tokio::task::spawn_blocking(move || collection.read())
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }

    /// [`write`](Self::write) on Tokio's blocking pool.
    pub async fn save(&self, items: Vec<T>) -> Result<(), StorageError> {
        let collection = self.clone();
        tokio::task::spawn_blocking(move || collection.write(&items))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: u32,
        label: String,
    }

    fn records() -> Vec<Record> {
        vec![
            Record { id: 3, label: "third".into() },
            Record { id: 1, label: "first".into() },
            Record { id: 2, label: "second".into() },
        ]
    }

    #[test]
    fn test_missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("records.json");
        let collection = JsonCollection::<Record>::new(&path);

        let items = collection.read().unwrap();

        assert!(items.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let collection = JsonCollection::<Record>::new(dir.path().join("records.json"));

        collection.write(&records()).unwrap();

        assert_eq!(collection.read().unwrap(), records());
    }

    #[test]
    fn test_written_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let collection = JsonCollection::<Record>::new(&path);

        collection.write(&records()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.lines().count() > records().len());
        assert!(text.contains("  \"label\": \"third\""));
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonCollection::<Record>::new(&path).read().unwrap_err();

        assert!(matches!(err, StorageError::Parse { .. }));
        // the corrupt file is left for inspection
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_blank_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "  \n").unwrap();

        assert!(JsonCollection::<Record>::new(&path).read().unwrap().is_empty());
    }

    #[test]
    fn test_directory_in_place_of_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::create_dir(&path).unwrap();

        let err = JsonCollection::<Record>::new(&path).read().unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[tokio::test]
    async fn test_async_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let collection = JsonCollection::<Record>::new(dir.path().join("records.json"));

        collection.save(records()).await.unwrap();

        assert_eq!(collection.load().await.unwrap(), records());
    }
}
