//! The in-memory address book.
//!
//! - **address_book**: name-keyed store of records with add/find/delete
//! - **upcoming**: the upcoming-birthday window query

pub mod address_book;
pub mod upcoming;

pub use address_book::AddressBook;
pub use upcoming::{UpcomingBirthday, DEFAULT_WINDOW_DAYS};
