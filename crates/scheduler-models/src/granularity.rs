//! Timeline granularity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The calendar unit one timeline column represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One column per day.
    Day,
    /// One column per seven days.
    Week,
    /// One column per calendar month.
    #[default]
    Month,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    /// Returns the lowercase name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    /// Length of one column in days, or `None` for the variable-length month.
    pub fn fixed_days(&self) -> Option<i64> {
        match self {
            Granularity::Day => Some(1),
            Granularity::Week => Some(7),
            Granularity::Month => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Granularity::Day),
            "week" | "weeks" => Ok(Granularity::Week),
            "month" | "months" => Ok(Granularity::Month),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_month() {
        assert_eq!(Granularity::default(), Granularity::Month);
    }

    #[test]
    fn test_fixed_days() {
        assert_eq!(Granularity::Day.fixed_days(), Some(1));
        assert_eq!(Granularity::Week.fixed_days(), Some(7));
        assert_eq!(Granularity::Month.fixed_days(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!(" days ".parse::<Granularity>().unwrap(), Granularity::Day);
        assert!("hour".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Granularity::Day).unwrap();
        assert_eq!(json, "\"day\"");
        let parsed: Granularity = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(parsed, Granularity::Month);
    }
}
