//! JSON file storage for the address book.

use super::traits::BookStorage;
use crate::book::AddressBook;
use crate::error::{StorageError, StorageResult};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Stores the address book as one JSON document.
///
/// Saves go to a sibling `*.tmp` file first and are renamed into place, so an
/// interrupted save leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl BookStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<AddressBook> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No address book at {}, starting empty",
                    self.path.display()
                );
                return Ok(AddressBook::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let book: AddressBook =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "Loaded {} contacts from {}",
            book.len(),
            self.path.display()
        );
        Ok(book)
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(book).map_err(StorageError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &json).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(
                    "Failed to remove {} after failed save: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            return Err(self.io_error(e));
        }

        debug!(
            "Saved {} contacts ({} bytes) to {}",
            book.len(),
            json.len(),
            self.path.display()
        );
        Ok(())
    }
}
