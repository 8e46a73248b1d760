//! Persistence for the address book.
//!
//! The book is always read and written as a whole. `BookStorage` is the
//! seam the session depends on; `JsonFileStorage` is the file-backed
//! implementation used by the binary.

pub mod json_file;
pub mod traits;

pub use json_file::JsonFileStorage;
pub use traits::BookStorage;
