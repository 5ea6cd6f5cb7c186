//! The Salesforce record identifier type
//!
//! A record ID is 15 or 18 ASCII alphanumerics. The first three characters
//! are the object-type key prefix (`001` for Account, `005` for User, ...).
//! The prefix is carried as-is and never interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the case-sensitive record ID form
pub const SHORT_ID_LEN: usize = 15;

/// Length of the case-insensitive record ID form (15 + 3 checksum chars)
pub const LONG_ID_LEN: usize = 18;

const KEY_PREFIX_LEN: usize = 3;

/// Errors from parsing a string into a [`RecordId`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIdError {
    /// Not 15 or 18 characters long
    #[error("Invalid record ID length: expected 15 or 18 characters, got {0}")]
    InvalidLength(usize),

    /// Contains a character outside `[0-9A-Za-z]`
    #[error("Invalid character {character:?} at index {index}")]
    InvalidCharacter { index: usize, character: char },
}

/// Which of the two record ID forms a value has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordIdForm {
    /// 15 characters
    Short15,
    /// 18 characters
    Long18,
}

/// A record identifier with a validated shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Parse and validate a record ID
    pub fn parse(value: &str) -> Result<Self, RecordIdError> {
        let len = value.chars().count();
        if len != SHORT_ID_LEN && len != LONG_ID_LEN {
            return Err(RecordIdError::InvalidLength(len));
        }

        if let Some((index, character)) = value
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
        {
            return Err(RecordIdError::InvalidCharacter { index, character });
        }

        Ok(Self(value.to_string()))
    }

    /// Wrap a regex capture that the identifier patterns already validated.
    pub(crate) fn from_match(value: &str) -> Self {
        debug_assert!(Self::parse(value).is_ok(), "pattern admitted {value:?}");
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The three-character object-type key prefix
    pub fn key_prefix(&self) -> &str {
        &self.0[..KEY_PREFIX_LEN]
    }

    pub fn form(&self) -> RecordIdForm {
        if self.0.len() == LONG_ID_LEN {
            RecordIdForm::Long18
        } else {
            RecordIdForm::Short15
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        let id = RecordId::parse("0018c00002NIZJIAA5").unwrap();
        assert_eq!(id.as_str(), "0018c00002NIZJIAA5");
        assert_eq!(id.form(), RecordIdForm::Long18);
        assert_eq!(id.key_prefix(), "001");
        assert_eq!(id.len(), 18);
    }

    #[test]
    fn test_parse_short_form() {
        let id: RecordId = "005fj000007W4pF".parse().unwrap();
        assert_eq!(id.form(), RecordIdForm::Short15);
        assert_eq!(id.key_prefix(), "005");
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(
            RecordId::parse("001abc"),
            Err(RecordIdError::InvalidLength(6))
        );
        assert_eq!(
            RecordId::parse("0018c00002NIZJIAA"),
            Err(RecordIdError::InvalidLength(17))
        );
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        assert_eq!(
            RecordId::parse("0018c00002-IZJIAA5"),
            Err(RecordIdError::InvalidCharacter {
                index: 10,
                character: '-'
            })
        );
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let id = RecordId::parse("0018c00002NIZJIAA5").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0018c00002NIZJIAA5\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<RecordId>("\"not-an-id\"").is_err());
    }

    #[test]
    fn test_compares_with_str() {
        let id = RecordId::parse("0018c00002NIZJIAA5").unwrap();
        assert_eq!(id, "0018c00002NIZJIAA5");
        assert_eq!(id.to_string(), "0018c00002NIZJIAA5");
    }
}
