//! Record model representing one contact in the address book.

use crate::domain::{Birthday, ContactName, PhoneNumber, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contact: a name, its phone numbers and an optional birthday.
///
/// Phone numbers keep insertion order and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: ContactName,

    #[serde(default)]
    phones: Vec<PhoneNumber>,

    #[serde(default)]
    birthday: Option<Birthday>,
}

impl Record {
    /// Create a record with no phones and no birthday.
    pub fn new(name: ContactName) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
        }
    }

    /// Create a record from raw name text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for an empty name.
    pub fn with_name(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(ContactName::new(name)?))
    }

    pub fn name(&self) -> &ContactName {
        &self.name
    }

    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validate and append a phone number. Duplicates are kept.
    pub fn add_phone(&mut self, number: &str) -> Result<(), ValidationError> {
        self.phones.push(PhoneNumber::new(number)?);
        Ok(())
    }

    /// Remove every phone equal to `number`. Missing numbers are ignored.
    pub fn remove_phone(&mut self, number: &str) {
        self.phones.retain(|phone| phone.as_str() != number);
    }

    /// Replace `old` with `new`.
    ///
    /// `new` is validated before anything is removed, so a rejected number
    /// leaves the list untouched. If `old` is not present this just appends
    /// `new`.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<(), ValidationError> {
        let new = PhoneNumber::new(new)?;
        self.remove_phone(old);
        self.phones.push(new);
        Ok(())
    }

    /// Whether any phone equals `number`.
    pub fn find_phone(&self, number: &str) -> bool {
        self.phones.iter().any(|phone| phone.as_str() == number)
    }

    /// Make `number` the only phone of this record.
    pub fn replace_phones(&mut self, number: &str) -> Result<(), ValidationError> {
        let phone = PhoneNumber::new(number)?;
        self.phones = vec![phone];
        Ok(())
    }

    /// Set the birthday from `DD.MM.YYYY` text, replacing any previous one.
    pub fn add_birthday(&mut self, text: &str) -> Result<(), ValidationError> {
        self.birthday = Some(Birthday::new(text)?);
        Ok(())
    }

    /// Phones joined with `"; "`, as shown in listings.
    pub fn phones_display(&self) -> String {
        self.phones
            .iter()
            .map(PhoneNumber::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contact name: {}, phones: {}",
            self.name,
            self.phones_display()
        )
    }
}
