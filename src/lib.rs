//! Contact Book - a command-line address book.
//!
//! Stores names, phone numbers and birthdays, persists them to a JSON file,
//! and answers lookups, listings and upcoming-birthday queries from an
//! interactive prompt.
//!
//! # Architecture
//!
//! - **domain**: Validated field values (name, phone number, birthday)
//! - **models**: The `Record` of one contact
//! - **book**: The `AddressBook` store and the upcoming-birthday query
//! - **matching**: Fuzzy name and exact phone matching for `search`
//! - **commands**: Input parsing, command handlers and dispatch
//! - **storage**: Whole-book persistence behind the `BookStorage` trait
//! - **session**: The interactive read-dispatch-print loop
//! - **config**: Configuration from environment variables
//! - **error**: Error types for each layer

pub mod book;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod models;
pub mod session;
pub mod storage;

pub use book::{AddressBook, UpcomingBirthday};
pub use config::{Config, SessionSettings};
pub use domain::{Birthday, ContactName, PhoneNumber, ValidationError};
pub use error::{BookError, CommandError, ConfigError, ErrorKind, SessionError, StorageError};
pub use models::Record;
pub use session::Session;
pub use storage::{BookStorage, JsonFileStorage};
