// ABOUTME: Validated task-definition family names.
// ABOUTME: The stable logical name under which revisions are registered.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FamilyNameError {
    #[error("family name cannot be empty")]
    Empty,

    #[error("family name exceeds maximum length of 255 characters")]
    TooLong,

    #[error("family name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("invalid character in family name: '{0}'")]
    InvalidChar(char),
}

/// The stable logical name for a line of task-definition revisions.
/// Letters, digits, hyphens, and underscores, up to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyName(String);

impl FamilyName {
    pub fn new(value: &str) -> Result<Self, FamilyNameError> {
        if value.is_empty() {
            return Err(FamilyNameError::Empty);
        }

        if value.len() > 255 {
            return Err(FamilyNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(FamilyNameError::StartsWithHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
                return Err(FamilyNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FamilyName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FamilyName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        FamilyName::new(&value).map_err(serde::de::Error::custom)
    }
}
