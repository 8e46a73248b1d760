//! Data models for the address book.
//!
//! This module contains the `Record` type, one contact made of a name,
//! an ordered list of phone numbers and an optional birthday.

pub mod record;

pub use record::Record;
