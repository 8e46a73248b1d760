//! Fuzzy matching utilities for the `search` command.
//!
//! This module provides fuzzy name matching and exact phone matching over
//! the records of an address book.

pub mod fuzzy_matcher;

pub use fuzzy_matcher::{ContactMatcher, MatchResult, MatchType};
