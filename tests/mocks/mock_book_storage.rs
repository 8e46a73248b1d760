use contact_book::error::{StorageError, StorageResult};
use contact_book::{AddressBook, BookStorage};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock storage for testing.
///
/// Keeps the saved book in memory, shares it between clones so a test can
/// inspect what a session wrote, and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockBookStorage {
    stored: Arc<Mutex<Option<AddressBook>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_saves: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockBookStorage {
    /// Create an empty MockBookStorage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that already holds `book`.
    pub fn with_book(book: AddressBook) -> Self {
        let storage = Self::new();
        *storage.stored.lock().unwrap() = Some(book);
        storage
    }

    /// The most recently saved book, if any.
    pub fn stored(&self) -> Option<AddressBook> {
        self.stored.lock().unwrap().clone()
    }

    /// Make every following save fail with an I/O error.
    pub fn fail_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl BookStorage for MockBookStorage {
    fn load(&self) -> StorageResult<AddressBook> {
        self.track_call("load");
        Ok(self.stored().unwrap_or_default())
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        self.track_call("save");
        if *self.fail_saves.lock().unwrap() {
            return Err(StorageError::Io {
                path: PathBuf::from("mock"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only mock"),
            });
        }
        *self.stored.lock().unwrap() = Some(book.clone());
        Ok(())
    }
}
