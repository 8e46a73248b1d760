//! Tokenizing input lines into commands.

use std::fmt;

/// Every command the session understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandName {
    Hello,
    Add,
    Change,
    Phone,
    All,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    Delete,
    Search,
    Help,
    Exit,
    /// A blank line
    Empty,
    /// Anything else, lower-cased
    Unknown(String),
}

impl CommandName {
    /// Match a command word, ignoring case. `close` and `exit` are synonyms.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "hello" => Self::Hello,
            "add" => Self::Add,
            "change" => Self::Change,
            "phone" => Self::Phone,
            "all" => Self::All,
            "add-birthday" => Self::AddBirthday,
            "show-birthday" => Self::ShowBirthday,
            "birthdays" => Self::Birthdays,
            "delete" => Self::Delete,
            "search" => Self::Search,
            "help" => Self::Help,
            "close" | "exit" => Self::Exit,
            "" => Self::Empty,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether the command can change the address book.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Change | Self::AddBirthday | Self::Delete
        )
    }

    /// The canonical spelling, used in logs and error context.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hello => "hello",
            Self::Add => "add",
            Self::Change => "change",
            Self::Phone => "phone",
            Self::All => "all",
            Self::AddBirthday => "add-birthday",
            Self::ShowBirthday => "show-birthday",
            Self::Birthdays => "birthdays",
            Self::Delete => "delete",
            Self::Search => "search",
            Self::Help => "help",
            Self::Exit => "exit",
            Self::Empty => "",
            Self::Unknown(word) => word,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed input line: the command and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub command: CommandName,
    pub args: Vec<String>,
}

/// Split a line on whitespace. The first token is the command, the rest are
/// its arguments.
pub fn parse_input(line: &str) -> ParsedInput {
    let mut tokens = line.split_whitespace();
    let command = tokens
        .next()
        .map_or(CommandName::Empty, CommandName::from_token);
    ParsedInput {
        command,
        args: tokens.map(str::to_string).collect(),
    }
}
