use crate::book::AddressBook;
use crate::error::StorageResult;

/// Whole-store persistence for an address book.
///
/// Implementations do not lock; only one process may use a given store at a
/// time.
pub trait BookStorage {
    /// Load the stored book, or an empty one if nothing has been saved yet.
    fn load(&self) -> StorageResult<AddressBook>;

    /// Replace the stored book with `book`.
    fn save(&self, book: &AddressBook) -> StorageResult<()>;
}
