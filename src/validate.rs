//! Input validation shared by the CLI and the TUI forms

use crate::types::FeedingPlan;
use chrono::NaiveDate;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_DAYS: u32 = 365;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    Date(String),
    #[error("'{0}' is not a number of days between 1 and 365")]
    Days(String),
    #[error("'{0}' is not a feeding plan (0/none, 1/once, 2/twice, 3/thrice)")]
    Plan(String),
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    // chrono accepts unpadded fields, the stored format does not
    let shaped = input.len() == 10
        && input
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    if !shaped {
        return Err(ValidationError::Date(input.to_string()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::Date(input.to_string()))
}

pub fn require_non_empty(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn parse_day_count(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_DAYS).contains(&n) => Ok(n),
        _ => Err(ValidationError::Days(input.trim().to_string())),
    }
}

pub fn parse_feeding_plan(input: &str) -> Result<FeedingPlan, ValidationError> {
    match input.trim().to_lowercase().as_str() {
        "" | "0" | "none" => Ok(FeedingPlan::None),
        "1" | "once" => Ok(FeedingPlan::Once),
        "2" | "twice" => Ok(FeedingPlan::Twice),
        "3" | "thrice" => Ok(FeedingPlan::Thrice),
        other => Err(ValidationError::Plan(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert!(parse_date("2024-13-40").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-3-15").is_err());
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("Name", "  Rex "), Ok("Rex".to_string()));
        assert_eq!(
            require_non_empty("Name", "   "),
            Err(ValidationError::Empty("Name"))
        );
    }

    #[test]
    fn test_parse_day_count() {
        assert_eq!(parse_day_count("14"), Ok(14));
        assert!(parse_day_count("0").is_err());
        assert!(parse_day_count("366").is_err());
        assert!(parse_day_count("-2").is_err());
        assert!(parse_day_count("a week").is_err());
    }

    #[test]
    fn test_parse_feeding_plan() {
        assert_eq!(parse_feeding_plan("2"), Ok(FeedingPlan::Twice));
        assert_eq!(parse_feeding_plan("Thrice"), Ok(FeedingPlan::Thrice));
        assert_eq!(parse_feeding_plan(""), Ok(FeedingPlan::None));
        assert!(parse_feeding_plan("four").is_err());
    }
}
