//! Command handlers.
//!
//! Each handler takes the command's arguments and the address book and
//! returns the reply text. Handlers never print, never read the clock and
//! never touch storage.

use crate::book::AddressBook;
use crate::domain::ContactName;
use crate::error::{BookError, CommandError, CommandResult};
use crate::matching::ContactMatcher;
use crate::models::Record;
use chrono::NaiveDate;

/// Fetch the argument at `index` or fail with `MissingArgument`.
fn arg<'a>(
    args: &'a [String],
    index: usize,
    command: &'static str,
    expected: &'static str,
) -> CommandResult<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or(CommandError::MissingArgument { command, expected })
}

/// `add <name> <phone>`: create the contact if needed, then add the phone.
pub fn add_contact(args: &[String], book: &mut AddressBook) -> CommandResult<String> {
    const USAGE: &str = "<name> <phone>";
    let name = arg(args, 0, "add", USAGE)?;
    let phone = arg(args, 1, "add", USAGE)?;

    if let Some(record) = book.find_mut(name) {
        record
            .add_phone(phone)
            .map_err(|e| CommandError::validation("add", e))?;
        return Ok("Contact updated.".to_string());
    }

    let name = ContactName::new(name).map_err(|e| CommandError::validation("add", e))?;
    let mut record = Record::new(name);
    record
        .add_phone(phone)
        .map_err(|e| CommandError::validation("add", e))?;
    book.add_record(record);
    Ok("Contact added.".to_string())
}

/// `change <name> <phone>` replaces all phones; `change <name> <old> <new>`
/// replaces one.
pub fn change_contact(args: &[String], book: &mut AddressBook) -> CommandResult<String> {
    const USAGE: &str = "<name> <phone> | <name> <old-phone> <new-phone>";
    let name = arg(args, 0, "change", USAGE)?;
    let first = arg(args, 1, "change", USAGE)?;

    let record = book
        .find_mut(name)
        .ok_or_else(|| CommandError::not_found("change", name))?;

    let result = match args.get(2) {
        Some(new) => record.edit_phone(first, new),
        None => record.replace_phones(first),
    };
    result.map_err(|e| CommandError::validation("change", e))?;

    Ok("Contact updated successfully".to_string())
}

/// `phone <name>`
pub fn show_phone(args: &[String], book: &AddressBook) -> CommandResult<String> {
    let name = arg(args, 0, "phone", "<name>")?;
    Ok(match book.find(name) {
        Some(record) => format!("Phone number for {}: {}", name, record.phones_display()),
        None => format!("Contact {} not found.", name),
    })
}

/// `all`: every contact in name order.
pub fn show_all(book: &AddressBook) -> CommandResult<String> {
    if book.is_empty() {
        return Ok("No contacts saved.".to_string());
    }
    Ok(book
        .records()
        .map(|record| format!("Name: {}, Phone: {}", record.name(), record.phones_display()))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `add-birthday <name> <DD.MM.YYYY>`
pub fn add_birthday(args: &[String], book: &mut AddressBook) -> CommandResult<String> {
    const USAGE: &str = "<name> <DD.MM.YYYY>";
    let name = arg(args, 0, "add-birthday", USAGE)?;
    let birthday = arg(args, 1, "add-birthday", USAGE)?;

    match book.find_mut(name) {
        Some(record) => {
            record
                .add_birthday(birthday)
                .map_err(|e| CommandError::validation("add-birthday", e))?;
            Ok(format!("Birthday added for {}", name))
        }
        None => Ok(format!("Contact {} not found.", name)),
    }
}

/// `show-birthday <name>`
pub fn show_birthday(args: &[String], book: &AddressBook) -> CommandResult<String> {
    let name = arg(args, 0, "show-birthday", "<name>")?;
    Ok(match book.find(name).and_then(Record::birthday) {
        Some(birthday) => format!("Birthday for {}: {}", name, birthday),
        None => format!("No birthday found for {}", name),
    })
}

/// `birthdays`: contacts with a birthday in `[today, today + window_days]`.
pub fn birthdays(book: &AddressBook, today: NaiveDate, window_days: u32) -> CommandResult<String> {
    let upcoming = book.upcoming_birthdays(today, window_days);
    if upcoming.is_empty() {
        return Ok(format!(
            "No upcoming birthdays in the next {} days.",
            window_days
        ));
    }
    Ok(upcoming
        .iter()
        .map(|entry| format!("{}: {}", entry.name, entry.date))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `delete <name>`
pub fn delete_contact(args: &[String], book: &mut AddressBook) -> CommandResult<String> {
    let name = arg(args, 0, "delete", "<name>")?;
    book.delete(name).map_err(|e| match e {
        BookError::KeyNotFound(name) => CommandError::not_found("delete", name),
    })?;
    Ok(format!("Contact {} deleted.", name))
}

/// `search <query...>`: fuzzy name or exact phone lookup.
pub fn search_contacts(
    args: &[String],
    book: &AddressBook,
    max_results: usize,
    min_confidence: u8,
) -> CommandResult<String> {
    arg(args, 0, "search", "<name or phone>")?;
    let query = args.join(" ");

    let matches =
        ContactMatcher::new().find_matches(&query, book.records(), max_results, min_confidence);
    if matches.is_empty() {
        return Ok(format!("No contacts match '{}'.", query));
    }
    Ok(matches
        .iter()
        .map(|m| m.record.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `help`
pub fn help() -> String {
    [
        "Commands:",
        "  hello",
        "  add <name> <phone>",
        "  change <name> <phone>",
        "  change <name> <old-phone> <new-phone>",
        "  phone <name>",
        "  all",
        "  add-birthday <name> <DD.MM.YYYY>",
        "  show-birthday <name>",
        "  birthdays",
        "  delete <name>",
        "  search <name or phone>",
        "  close | exit",
    ]
    .join("\n")
}
