use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown wherever a provider did not supply a value.
pub const NOT_AVAILABLE: &str = "Not available for this provider.";

/// A single optional scalar from a provider record.
///
/// Providers differ in what they fill in, so every displayed scalar goes
/// through here. `null`, a missing key and an empty string all collapse to
/// `NotAvailable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum Field {
    Value(String),
    #[default]
    NotAvailable,
}

impl Field {
    pub fn from_raw(raw: Option<String>) -> Self {
        match raw {
            Some(s) if !s.trim().is_empty() => Self::Value(s),
            _ => Self::NotAvailable,
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Value(s) => Some(s.as_str()),
            Self::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Text used for searching and sorting. Absent values have no text.
    pub fn text(&self) -> &str {
        self.as_deref().unwrap_or("")
    }
}

impl From<Option<String>> for Field {
    fn from(raw: Option<String>) -> Self {
        Self::from_raw(raw)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self::from_raw(Some(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_deref().unwrap_or(NOT_AVAILABLE))
    }
}
