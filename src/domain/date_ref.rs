//! Date reference parsing and resolution

use crate::error::{BitacoraError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A date typed by a user: a keyword, a weekday, or an ISO date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateReference {
    Today,
    Yesterday,
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// `YYYY-MM-DD`
    Specific(NaiveDate),
}

impl DateReference {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "" | "today" | "now" => Ok(DateReference::Today),
            "yesterday" => Ok(DateReference::Yesterday),
            other => {
                if let Ok(weekday) = other.parse::<Weekday>() {
                    return Ok(DateReference::Weekday(weekday));
                }
                NaiveDate::parse_from_str(other, "%Y-%m-%d")
                    .map(DateReference::Specific)
                    .map_err(|_| BitacoraError::InvalidDateReference(input.to_string()))
            }
        }
    }

    /// Resolve against `today`
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateReference::Today => today,
            DateReference::Yesterday => today - Duration::days(1),
            DateReference::Weekday(target) => {
                let days_back = (today.weekday().num_days_from_monday() + 7
                    - target.num_days_from_monday())
                    % 7;
                today - Duration::days(days_back as i64)
            }
            DateReference::Specific(date) => *date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Friday
    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(DateReference::parse("today").unwrap(), DateReference::Today);
        assert_eq!(DateReference::parse(" Now ").unwrap(), DateReference::Today);
        assert_eq!(DateReference::parse("").unwrap(), DateReference::Today);
        assert_eq!(
            DateReference::parse("yesterday").unwrap(),
            DateReference::Yesterday
        );
    }

    #[test]
    fn test_parse_weekdays() {
        assert_eq!(
            DateReference::parse("monday").unwrap(),
            DateReference::Weekday(Weekday::Mon)
        );
        assert_eq!(
            DateReference::parse("Fri").unwrap(),
            DateReference::Weekday(Weekday::Fri)
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            DateReference::parse("2024-12-25").unwrap(),
            DateReference::Specific(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            DateReference::parse("17-01-2025"),
            Err(BitacoraError::InvalidDateReference(_))
        ));
        assert!(DateReference::parse("2025-13-01").is_err());
        assert!(DateReference::parse("someday").is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(DateReference::Today.resolve(base()), base());
        assert_eq!(
            DateReference::Yesterday.resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
        );
        assert_eq!(DateReference::Weekday(Weekday::Fri).resolve(base()), base());
        assert_eq!(
            DateReference::Weekday(Weekday::Mon).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
        );
        assert_eq!(
            DateReference::Weekday(Weekday::Sat).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 11).unwrap()
        );
    }
}
