//! Interactive session.
//!
//! Reads commands line by line, answers each one, and persists the address
//! book when the session ends. The book is saved on `close`/`exit`, at end
//! of input, on the shutdown signal, and as a last resort when the session
//! is dropped without having saved (early error return or panic unwind).

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::book::AddressBook;
use crate::commands::{self, parse_input, Outcome};
use crate::config::SessionSettings;
use crate::error::{SessionResult, StorageResult};
use crate::storage::BookStorage;
use chrono::NaiveDate;
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info, warn};

pub const WELCOME: &str = "Welcome to the assistant bot!";
pub const PROMPT: &str = "Enter a command: ";
pub const SAVED: &str = "Address book saved.";
pub const GOODBYE: &str = "Good bye!";

/// An address book bound to the storage it is persisted to.
pub struct Session<S: BookStorage> {
    book: AddressBook,
    storage: S,
    settings: SessionSettings,
    saved: bool,
}

impl<S: BookStorage> Session<S> {
    /// Start a session on `book`. The book is treated as unsaved.
    pub fn new(book: AddressBook, storage: S, settings: SessionSettings) -> Self {
        Self {
            book,
            storage,
            settings,
            saved: false,
        }
    }

    /// Load the book from `storage` and start a session on it.
    ///
    /// # Errors
    ///
    /// Any load failure other than a missing file.
    pub fn open(storage: S, settings: SessionSettings) -> StorageResult<Self> {
        let book = storage.load()?;
        let mut session = Self::new(book, storage, settings);
        session.saved = true;
        Ok(session)
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Parse and run one input line.
    ///
    /// The book is marked unsaved only if the command changed it.
    pub fn handle_line(&mut self, line: &str, today: NaiveDate) -> Outcome {
        let input = parse_input(line);
        if !input.command.mutates() {
            return commands::dispatch(&input, &mut self.book, today, &self.settings);
        }

        let before = self.book.clone();
        let outcome = commands::dispatch(&input, &mut self.book, today, &self.settings);
        if self.book != before {
            self.saved = false;
        }
        outcome
    }

    /// Whether the book on storage matches the one in memory.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Write the whole book to storage.
    pub fn save(&mut self) -> StorageResult<()> {
        self.storage.save(&self.book)?;
        self.saved = true;
        Ok(())
    }

    /// Run the read-dispatch-print loop until exit, end of input or `shutdown`.
    ///
    /// `shutdown` is raced against every read; the binary passes Ctrl-C.
    /// A line that is not valid UTF-8 is answered as an invalid command.
    pub async fn run<R, W, C, F>(
        &mut self,
        mut input: R,
        output: &mut W,
        clock: &C,
        shutdown: F,
    ) -> SessionResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        C: Clock,
        F: Future<Output = ()>,
    {
        writeln!(output, "{}", WELCOME)?;

        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            buf.clear();
            let read = tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("Shutdown requested, saving address book");
                    writeln!(output)?;
                    self.save()?;
                    writeln!(output, "{}", SAVED)?;
                    return Ok(());
                }
                read = input.read_until(b'\n', &mut buf) => read?,
            };

            if read == 0 {
                info!("End of input, closing session");
                writeln!(output)?;
                return self.close(output);
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!(bytes = buf.len(), "Ignoring input line that is not UTF-8: {}", e);
                    writeln!(output, "{}", commands::INVALID_COMMAND)?;
                    continue;
                }
            };

            match self.handle_line(line, clock.today()) {
                Outcome::Reply(text) => writeln!(output, "{}", text)?,
                Outcome::Silent => {}
                Outcome::Exit => return self.close(output),
            }
        }
    }

    fn close<W: Write>(&mut self, output: &mut W) -> SessionResult<()> {
        self.save()?;
        info!("Address book saved ({} contacts)", self.book.len());
        writeln!(output, "{}", SAVED)?;
        writeln!(output, "{}", GOODBYE)?;
        Ok(())
    }
}

impl<S: BookStorage> Drop for Session<S> {
    fn drop(&mut self) {
        if self.saved {
            return;
        }
        match self.storage.save(&self.book) {
            Ok(()) => info!("Address book saved on shutdown"),
            Err(e) => error!("Failed to save address book on shutdown: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileStorage;
    use std::future::{pending, ready};
    use tempfile::{tempdir, TempDir};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn new_session() -> (TempDir, Session<JsonFileStorage>) {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("book.json"));
        let session = Session::open(storage, SessionSettings::default()).unwrap();
        (dir, session)
    }

    async fn transcript(session: &mut Session<JsonFileStorage>, script: &str) -> String {
        let mut output = Vec::new();
        session
            .run(script.as_bytes(), &mut output, &FixedClock(today()), pending())
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_run_answers_commands_and_saves_on_exit() {
        let (_dir, mut session) = new_session();

        let out = transcript(
            &mut session,
            "hello\nadd Alice 1111111111\nphone Alice\nexit\n",
        )
        .await;

        assert!(out.starts_with(WELCOME));
        assert!(out.contains("How can I help you?\n"));
        assert!(out.contains("Contact added.\n"));
        assert!(out.contains("Phone number for Alice: 1111111111\n"));
        assert!(out.ends_with("Address book saved.\nGood bye!\n"));

        let stored = session.storage().load().unwrap();
        assert!(stored.find("Alice").is_some());
    }

    #[tokio::test]
    async fn test_run_stops_at_exit() {
        let (_dir, mut session) = new_session();

        let out = transcript(&mut session, "close\nadd Bob 2222222222\n").await;

        assert!(!out.contains("Contact added."));
        assert!(session.book().find("Bob").is_none());
    }

    #[tokio::test]
    async fn test_run_saves_at_end_of_input() {
        let (_dir, mut session) = new_session();

        let out = transcript(&mut session, "add Alice 1111111111\n").await;

        assert!(out.ends_with("Good bye!\n"));
        assert_eq!(session.storage().load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_saves_on_shutdown_signal() {
        let (_dir, mut session) = new_session();
        session.handle_line("add Alice 1111111111", today());

        let mut output = Vec::new();
        session
            .run(
                "add Bob 2222222222\n".as_bytes(),
                &mut output,
                &FixedClock(today()),
                ready(()),
            )
            .await
            .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.ends_with("Address book saved.\n"));
        let stored = session.storage().load().unwrap();
        assert!(stored.find("Alice").is_some());
        assert!(stored.find("Bob").is_none());
    }

    #[tokio::test]
    async fn test_blank_lines_print_nothing() {
        let (_dir, mut session) = new_session();

        let out = transcript(&mut session, "\n   \nexit\n").await;

        assert_eq!(
            out,
            format!("{WELCOME}\n{PROMPT}{PROMPT}{PROMPT}{SAVED}\n{GOODBYE}\n")
        );
    }

    #[test]
    fn test_open_session_starts_saved() {
        let (_dir, mut session) = new_session();
        assert!(session.is_saved());

        session.handle_line("all", today());
        session.handle_line("phone Nobody", today());
        session.handle_line("delete Nobody", today());
        assert!(session.is_saved());

        session.handle_line("add Alice 1111111111", today());
        assert!(!session.is_saved());
    }

    #[test]
    fn test_unchanged_session_does_not_write_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");

        {
            let mut session =
                Session::open(JsonFileStorage::new(&path), SessionSettings::default()).unwrap();
            session.handle_line("all", today());
        }

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_non_utf8_line_is_an_invalid_command() {
        let (_dir, mut session) = new_session();
        let mut output = Vec::new();

        session
            .run(
                &b"add Alice 1111111111\n\xff\xfe\nphone Alice\nexit\n"[..],
                &mut output,
                &FixedClock(today()),
                pending(),
            )
            .await
            .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Contact added.\n"));
        assert!(out.contains(&format!("{PROMPT}{}\n", commands::INVALID_COMMAND)));
        assert!(out.contains("Phone number for Alice: 1111111111\n"));
        assert!(out.ends_with("Good bye!\n"));
    }

    #[test]
    fn test_drop_saves_unsaved_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");

        {
            let mut session =
                Session::open(JsonFileStorage::new(&path), SessionSettings::default()).unwrap();
            session.handle_line("add Alice 1111111111", today());
        }

        let stored = JsonFileStorage::new(&path).load().unwrap();
        assert!(stored.find("Alice").is_some());
    }

    #[test]
    fn test_drop_saves_after_panic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");
        let storage = JsonFileStorage::new(&path);

        let result = std::panic::catch_unwind(move || {
            let mut session = Session::open(storage, SessionSettings::default()).unwrap();
            session.handle_line("add Alice 1111111111", today());
            panic!("boom");
        });

        assert!(result.is_err());
        let stored = JsonFileStorage::new(&path).load().unwrap();
        assert!(stored.find("Alice").is_some());
    }
}
