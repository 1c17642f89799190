//! ISO 8601 durations as the platform reports them (`PT10M30S`, `P1DT2H`, `P0D`).
//!
//! Weeks, days, hours, minutes and seconds are supported, with an optional
//! fraction on any component. Years and months have no fixed length and are
//! rejected.

use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("duration must start with 'P'")]
    MissingPrefix,
    #[error("duration has no components")]
    Empty,
    #[error("time designator 'T' is not followed by any component")]
    EmptyTimePart,
    #[error("number {0:?} is not followed by a designator")]
    MissingDesignator(String),
    #[error("designator '{0}' is not preceded by a number")]
    MissingNumber(char),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unexpected designator '{0}'")]
    UnexpectedDesignator(char),
    #[error("calendar unit '{0}' has no fixed length")]
    CalendarUnit(char),
    #[error("duration is out of range")]
    OutOfRange,
}

const DATE_UNITS: &[(char, f64)] = &[('W', 7.0 * 86_400.0), ('D', 86_400.0)];
const TIME_UNITS: &[(char, f64)] = &[('H', 3_600.0), ('M', 60.0), ('S', 1.0)];

pub fn parse_duration(text: &str) -> Result<Duration, DurationParseError> {
    let rest = text.trim().strip_prefix('P').ok_or(DurationParseError::MissingPrefix)?;
    if rest.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((_, "")) => return Err(DurationParseError::EmptyTimePart),
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    let mut seconds = sum_components(date_part, DATE_UNITS, &['Y', 'M'])?;
    if let Some(time) = time_part {
        seconds += sum_components(time, TIME_UNITS, &[])?;
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| DurationParseError::OutOfRange)
}

/// Sums `<number><designator>` pairs. Designators must follow the order of `units`.
fn sum_components(part: &str, units: &[(char, f64)], calendar: &[char]) -> Result<f64, DurationParseError> {
    let mut total = 0.0;
    let mut number = String::new();
    let mut next_unit = 0;

    for ch in part.chars() {
        if ch.is_ascii_digit() || ch == '.' || ch == ',' {
            number.push(ch);
            continue;
        }
        if calendar.contains(&ch) {
            return Err(DurationParseError::CalendarUnit(ch));
        }
        let position = units[next_unit..]
            .iter()
            .position(|(unit, _)| *unit == ch)
            .ok_or(DurationParseError::UnexpectedDesignator(ch))?;
        if number.is_empty() {
            return Err(DurationParseError::MissingNumber(ch));
        }

        let value: f64 = number
            .replace(',', ".")
            .parse()
            .map_err(|_| DurationParseError::InvalidNumber(number.clone()))?;
        total += value * units[next_unit + position].1;
        next_unit += position + 1;
        number.clear();
    }

    if !number.is_empty() {
        return Err(DurationParseError::MissingDesignator(number));
    }
    Ok(total)
}
