//! Name-keyed store of contact records.

use super::upcoming::{self, UpcomingBirthday};
use crate::error::{BookError, BookResult};
use crate::models::Record;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Mapping from contact name to its record.
///
/// There is exactly one record per name. Iteration follows name order, so
/// listings are deterministic without an extra sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: BTreeMap<String, Record>,
}

impl AddressBook {
    /// Create an empty address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same name.
    ///
    /// Returns the replaced record, if any.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        self.records
            .insert(record.name().as_str().to_string(), record)
    }

    /// Look up a record. A missing name is not an error.
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Look up a record for in-place changes.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Remove and return the record stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns `BookError::KeyNotFound` if no such record exists.
    pub fn delete(&mut self, name: &str) -> BookResult<Record> {
        self.records
            .remove(name)
            .ok_or_else(|| BookError::KeyNotFound(name.to_string()))
    }

    /// All records in name order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// All names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contacts whose next birthday falls within `window_days` of `today`.
    ///
    /// Each stored birthday is moved onto `today`'s year, or the next year
    /// if it has already passed, and kept when it lands in
    /// `[today, today + window_days]`. Sorted ascending by date.
    pub fn upcoming_birthdays(&self, today: NaiveDate, window_days: u32) -> Vec<UpcomingBirthday> {
        upcoming::collect(self.records(), today, window_days)
    }
}

impl FromIterator<Record> for AddressBook {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut book = Self::new();
        for record in iter {
            book.add_record(record);
        }
        book
    }
}

// Serde support - the file holds a plain name -> record object
impl Serialize for AddressBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.records.serialize(serializer)
    }
}

// Serde support - re-key by each record's own name so the map key can never
// disagree with the record. Two entries naming the same contact are rejected.
impl<'de> Deserialize<'de> for AddressBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = BTreeMap::<String, Record>::deserialize(deserializer)?;
        let mut book = AddressBook::new();
        for record in entries.into_values() {
            if book.contains(record.name().as_str()) {
                return Err(de::Error::custom(format!(
                    "duplicate contact name: {}",
                    record.name()
                )));
            }
            book.add_record(record);
        }
        Ok(book)
    }
}
