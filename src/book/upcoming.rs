//! Upcoming-birthday query.

use crate::models::Record;
use chrono::{Days, NaiveDate};

/// Window used by the `birthdays` command unless configured otherwise.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// A contact whose next birthday falls inside the query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    /// Name of the contact
    pub name: String,

    /// Date of the next anniversary, on or after the query day
    pub date: NaiveDate,
}

/// Collect the records whose next birthday lies in `[today, today + window_days]`.
///
/// The result is sorted by date, then by name.
pub(crate) fn collect<'a>(
    records: impl Iterator<Item = &'a Record>,
    today: NaiveDate,
    window_days: u32,
) -> Vec<UpcomingBirthday> {
    let end = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut upcoming: Vec<UpcomingBirthday> = records
        .filter_map(|record| {
            let next = record.birthday()?.next_occurrence(today)?;
            (next >= today && next <= end).then(|| UpcomingBirthday {
                name: record.name().to_string(),
                date: next,
            })
        })
        .collect();

    upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
    upcoming
}
