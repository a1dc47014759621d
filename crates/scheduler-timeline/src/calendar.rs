//! Calendar unit arithmetic.
//!
//! Pure conversions between `(date, granularity)` and `(column index, label)`,
//! plus strict date parsing and formatting. Dates are `NaiveDate` wall-clock
//! days, so there is no time-of-day or UTC offset to drift.
//!
//! Month steps clamp to the end of a shorter target month: Jan 31 plus one
//! month is Feb 28 (or 29). A day-of-month does not survive every step, so
//! always step from the original base rather than chaining.

use chrono::{Datelike, Days, Months, NaiveDate};
use scheduler_models::Granularity;

/// Months since year 0, i.e. `year * 12 + (month - 1)`.
pub fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

/// First day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in `date`'s month.
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Shifts a date by whole days, saturating at the representable range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    };
    shifted.unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Shifts a date by calendar months, clamping the day to the target month.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let delta = Months::new(u32::try_from(months.unsigned_abs()).unwrap_or(u32::MAX));
    let shifted = if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    };
    shifted.unwrap_or(if months < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Shifts a date by `units` steps of the given granularity.
pub fn add_units(date: NaiveDate, units: i64, granularity: Granularity) -> NaiveDate {
    match granularity.fixed_days() {
        Some(days) => add_days(date, units.saturating_mul(days)),
        None => add_months(date, units),
    }
}

/// Date of column `index` counted from `base`.
///
/// Day and Week columns are strictly increasing in `index`; Month columns
/// are non-decreasing because of end-of-month clamping.
pub fn column_to_date(base: NaiveDate, index: i64, granularity: Granularity) -> NaiveDate {
    add_units(base, index, granularity)
}

/// Date a column is labelled by: the column date, or the first of the month
/// for Month columns.
pub fn column_start(base: NaiveDate, index: i64, granularity: Granularity) -> NaiveDate {
    let date = column_to_date(base, index, granularity);
    match granularity {
        Granularity::Month => first_of_month(date),
        _ => date,
    }
}

/// Header label of the column containing `date`.
///
/// - Day: `"Jan 15"`
/// - Week: `"Week 3"` (ISO-8601 week number)
/// - Month: `"January 2025"`
pub fn column_label(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => date.format("%b %-d").to_string(),
        Granularity::Week => format!("Week {}", iso_week_number(date)),
        Granularity::Month => date.format("%B %Y").to_string(),
    }
}

/// ISO-8601 week number (Monday-start weeks, week 1 holds the year's first Thursday).
///
/// The date is moved to the Thursday of its week; the week number is then
/// `ceil(ordinal / 7)` within that Thursday's year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let offset = 3 - date.weekday().num_days_from_monday() as i64;
    let thursday = add_days(date, offset);
    thursday.ordinal().div_ceil(7)
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// Returns `None` for anything else instead of failing, so one malformed
/// record can be skipped without aborting a whole load.
pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Formats a date as `YYYY-MM-DD`.
///
/// Round-trips through [`parse_iso`] for years 0000 through 9999. Outside
/// that range chrono writes a signed year (`+10000-01-01`), which
/// [`parse_iso`] rejects.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses the `MM.DD.YYYY` form used by the work order editor.
pub fn parse_dotted(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('.');
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
