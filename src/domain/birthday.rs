//! Birthday value object.

use super::errors::ValidationError;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Text layout of a birthday, `DD.MM.YYYY`.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

// chrono alone accepts "5.6.1990", the stored form is always zero-padded.
static BIRTHDAY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("Failed to compile birthday regex")
});

/// A contact's date of birth.
///
/// Keeps the text it was created from so it renders exactly as entered.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use contact_book::domain::Birthday;
///
/// let birthday = Birthday::new("05.06.1990").unwrap();
/// assert_eq!(birthday.date(), NaiveDate::from_ymd_opt(1990, 6, 5).unwrap());
/// assert_eq!(birthday.to_string(), "05.06.1990");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Birthday {
    text: String,
    date: NaiveDate,
}

impl Birthday {
    /// Parse a birthday from `DD.MM.YYYY` text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBirthday` if the text has the wrong
    /// layout or names a date that does not exist (e.g. `31.02.1990`).
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();

        if !BIRTHDAY_REGEX.is_match(&text) {
            return Err(ValidationError::InvalidBirthday(text));
        }

        match NaiveDate::parse_from_str(&text, BIRTHDAY_FORMAT) {
            Ok(date) => Ok(Self { text, date }),
            Err(_) => Err(ValidationError::InvalidBirthday(text)),
        }
    }

    /// Build a birthday from an already valid date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            text: date.format(BIRTHDAY_FORMAT).to_string(),
            date,
        }
    }

    /// The calendar date of birth.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Get the birthday as entered.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The anniversary falling in `year`.
    ///
    /// A 29 February birthday is celebrated on 28 February in common years.
    /// Returns `None` only when `year` is outside chrono's range.
    pub fn anniversary_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
    }

    /// The first anniversary on or after `today`.
    ///
    /// Moves the birthday onto `today`'s year, and onto the following year
    /// when that date has already passed.
    pub fn next_occurrence(&self, today: NaiveDate) -> Option<NaiveDate> {
        let this_year = self.anniversary_in(today.year())?;
        if this_year < today {
            self.anniversary_in(today.year() + 1)
        } else {
            Some(this_year)
        }
    }
}

impl Serialize for Birthday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.text.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Birthday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Birthday::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
