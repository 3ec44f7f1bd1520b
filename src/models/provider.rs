use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sandbox HR/payroll providers the dashboard can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Gusto,
    BambooHr,
    Justworks,
    PaychexFlex,
    Workday,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[
        Provider::Gusto,
        Provider::BambooHr,
        Provider::Justworks,
        Provider::PaychexFlex,
        Provider::Workday,
    ];

    /// Identifier sent to the sandbox API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gusto => "gusto",
            Self::BambooHr => "bamboohr",
            Self::Justworks => "justworks",
            Self::PaychexFlex => "paychex_flex",
            Self::Workday => "workday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gusto => "Gusto",
            Self::BambooHr => "BambooHR",
            Self::Justworks => "Justworks",
            Self::PaychexFlex => "Paychex Flex",
            Self::Workday => "Workday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.label() == label)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let ids: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
            format!("unknown provider '{}' (expected one of: {})", s, ids.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(Provider::parse("gusto"), Some(Provider::Gusto));
        assert_eq!(Provider::parse("PAYCHEX_FLEX"), Some(Provider::PaychexFlex));
        assert_eq!(Provider::parse(" workday "), Some(Provider::Workday));
        assert_eq!(Provider::parse("adp"), None);
    }

    #[test]
    fn test_labels_round_trip() {
        for provider in Provider::ALL {
            assert_eq!(Provider::from_label(provider.label()), Some(*provider));
        }
    }

    #[test]
    fn test_from_str_error_lists_ids() {
        let err = "nope".parse::<Provider>().unwrap_err();
        assert!(err.contains("bamboohr"));
        assert!(err.contains("paychex_flex"));
    }
}
