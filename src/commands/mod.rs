//! Command parsing, handling and dispatch.
//!
//! - **parser**: splits an input line into a command and arguments
//! - **handlers**: one pure function per command, returning `CommandResult<String>`
//!
//! [`dispatch`] is the single place where handler errors are turned into the
//! fixed text shown to the user.

pub mod handlers;
pub mod parser;

pub use parser::{parse_input, CommandName, ParsedInput};

use crate::book::AddressBook;
use crate::config::SessionSettings;
use crate::error::CommandResult;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Reply shown for a command word nobody recognises.
pub const INVALID_COMMAND: &str = "Invalid command.";

/// What the session should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text and read the next line
    Reply(String),
    /// Print nothing and read the next line
    Silent,
    /// Save and stop
    Exit,
}

/// Run one parsed command against the book.
///
/// `today` is the reference day for the `birthdays` query.
pub fn dispatch(
    input: &ParsedInput,
    book: &mut AddressBook,
    today: NaiveDate,
    settings: &SessionSettings,
) -> Outcome {
    debug!(command = %input.command, args = input.args.len(), "Dispatching command");

    let args = input.args.as_slice();
    let result = match &input.command {
        CommandName::Exit => return Outcome::Exit,
        CommandName::Empty => return Outcome::Silent,
        CommandName::Unknown(word) => {
            debug!(command = %word, "Unknown command");
            return Outcome::Reply(INVALID_COMMAND.to_string());
        }
        CommandName::Hello => Ok("How can I help you?".to_string()),
        CommandName::Help => Ok(handlers::help()),
        CommandName::Add => handlers::add_contact(args, book),
        CommandName::Change => handlers::change_contact(args, book),
        CommandName::Phone => handlers::show_phone(args, book),
        CommandName::All => handlers::show_all(book),
        CommandName::AddBirthday => handlers::add_birthday(args, book),
        CommandName::ShowBirthday => handlers::show_birthday(args, book),
        CommandName::Birthdays => {
            handlers::birthdays(book, today, settings.birthday_window_days)
        }
        CommandName::Delete => handlers::delete_contact(args, book),
        CommandName::Search => handlers::search_contacts(
            args,
            book,
            settings.max_match_results,
            settings.match_confidence_threshold,
        ),
    };

    Outcome::Reply(render(result))
}

/// Map a handler result to user text. Error details go to the log only.
pub fn render(result: CommandResult<String>) -> String {
    match result {
        Ok(message) => message,
        Err(e) => {
            warn!(command = e.command(), kind = %e.kind(), "Command failed: {}", e);
            e.kind().as_str().to_string()
        }
    }
}
