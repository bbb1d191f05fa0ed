//! Lookup Key Module
//!
//! Validation and syntactic classification of user search input.

use std::fmt;

use crate::error::{LookupError, Result};

// == Lookup Key ==
/// A validated search term.
///
/// All-digit input is an ID, anything else a lowercased name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Id(u32),
    Name(String),
}

impl LookupKey {
    /// Validates and classifies raw user input.
    ///
    /// Surrounding whitespace is ignored. Empty input and input starting with
    /// `0` are rejected since upstream numbering starts at 1.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(LookupError::InvalidInput("empty search".to_string()));
        }
        if trimmed.starts_with('0') {
            return Err(LookupError::InvalidInput(format!(
                "leading zero in {trimmed:?}"
            )));
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            trimmed
                .parse()
                .map(LookupKey::Id)
                .map_err(|_| LookupError::InvalidInput(format!("id out of range: {trimmed}")))
        } else {
            Ok(LookupKey::Name(trimmed.to_lowercase()))
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "{id}"),
            LookupKey::Name(name) => f.write_str(name),
        }
    }
}
