//! Date field validation

use chrono::NaiveDate;
use wiform_common::DateField;

use super::FieldCheck;

const MIN_YEAR: i64 = 1900;
const MAX_YEAR: i64 = 2100;

/// Trimmed, non-empty ASCII digits only; signs and spaces inside are rejected
fn parse_component(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Validate a day/month/year triple
///
/// All-empty is valid (optional field). A partially filled date is
/// invalid. A full date needs day 1-31, month 1-12, year 1900-2100 and
/// must exist on the calendar.
pub fn validate_date(date: &DateField) -> FieldCheck {
    if date.is_empty() {
        return FieldCheck::pass("No date provided");
    }
    if !date.is_complete() {
        return FieldCheck::fail("Incomplete date (missing day, month, or year)");
    }

    let parsed = (
        parse_component(&date.day),
        parse_component(&date.month),
        parse_component(&date.year),
    );
    let (day, month, year) = match parsed {
        (Some(d), Some(m), Some(y)) => (d, m, y),
        _ => {
            return FieldCheck::fail(format!(
                "Invalid date: non-numeric component in {}/{}/{}",
                date.day.trim(),
                date.month.trim(),
                date.year.trim()
            ))
        }
    };

    if !(1..=31).contains(&day) {
        return FieldCheck::fail(format!("Invalid day: {day}"));
    }
    if !(1..=12).contains(&month) {
        return FieldCheck::fail(format!("Invalid month: {month}"));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return FieldCheck::fail(format!("Invalid year: {year}"));
    }

    match NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32) {
        Some(_) => FieldCheck::pass("Valid date"),
        None => FieldCheck::fail("Invalid date: day is out of range for month"),
    }
}

/// Calendar date for a complete, all-digit date field
///
/// Accepts exactly what [`validate_date`] parses; `None` when any component
/// is missing, non-numeric, or the date does not exist.
pub fn to_calendar_date(date: &DateField) -> Option<NaiveDate> {
    let day = parse_component(&date.day)?;
    let month = parse_component(&date.month)?;
    let year = parse_component(&date.year)?;
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}
