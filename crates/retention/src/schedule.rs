//! Disposition date arithmetic.
//!
//! `disposition_date = archival_date + total retention years`. When the
//! archival day does not exist in the target year (Feb 29 into a common
//! year) the date clamps to the last valid day of that month.
//!
//! `years_remaining` is the whole-year distance from the reference date to
//! the disposition date, truncated toward zero.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::RetentionError;
use crate::model::DispositionSchedule;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a raw date/timestamp as stored upstream.
///
/// Blank input is `Ok(None)` (missing, record gets excluded). Anything else
/// that does not parse is a contract breach and fails the whole report.
pub fn parse_record_date(
    kind: &str,
    record_id: &str,
    raw: &str,
) -> Result<Option<NaiveDate>, RetentionError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(Some(date));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(Some(ts.date()));
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(ts.date_naive()));
    }

    Err(RetentionError::DateParse {
        kind: kind.into(),
        record_id: record_id.into(),
        value: value.into(),
    })
}

/// Calendar-aware `date + years`, clamping to the end of the month.
/// `None` only when the result falls outside chrono's representable range.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    date.checked_add_months(Months::new(months))
}

/// Signed whole years from `from` to `to`, truncated toward zero.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    if to < from {
        return -whole_years_between(to, from);
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Compute the disposition date and remaining years against `reference`.
///
/// Zero total retention means "not configured" and yields `None`, as does a
/// disposition date beyond the calendar range.
pub fn compute_disposition(
    archival_date: NaiveDate,
    total_retention_years: u32,
    reference: NaiveDate,
) -> Option<DispositionSchedule> {
    if total_retention_years == 0 {
        return None;
    }
    let disposition_date = add_years(archival_date, total_retention_years)?;
    Some(DispositionSchedule {
        disposition_date,
        years_remaining: whole_years_between(reference, disposition_date),
    })
}

/// January 1st of the reference year.
pub fn reference_date(reference_year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(reference_year, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_record_date("folder", "b1", "2020-01-15").unwrap(), Some(d("2020-01-15")));
        assert_eq!(
            parse_record_date("folder", "b1", "2020-01-15 08:30:00").unwrap(),
            Some(d("2020-01-15"))
        );
        assert_eq!(
            parse_record_date("folder", "b1", "2020-01-15T23:59:59+07:00").unwrap(),
            Some(d("2020-01-15"))
        );
        assert_eq!(parse_record_date("item", "a1", "15/01/2020").unwrap(), Some(d("2020-01-15")));
    }

    #[test]
    fn blank_date_is_missing_not_error() {
        assert_eq!(parse_record_date("item", "a1", "").unwrap(), None);
        assert_eq!(parse_record_date("item", "a1", "   ").unwrap(), None);
    }

    #[test]
    fn malformed_date_is_error() {
        let err = parse_record_date("item", "a7", "2020-13-45").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a7"));
        assert!(msg.contains("2020-13-45"));
    }

    #[test]
    fn add_years_keeps_day_of_month() {
        assert_eq!(add_years(d("2020-01-15"), 5), Some(d("2025-01-15")));
    }

    #[test]
    fn add_years_clamps_leap_day() {
        assert_eq!(add_years(d("2020-02-29"), 1), Some(d("2021-02-28")));
        assert_eq!(add_years(d("2020-02-29"), 4), Some(d("2024-02-29")));
    }

    #[test]
    fn whole_years_truncate_toward_zero() {
        assert_eq!(whole_years_between(d("2025-01-01"), d("2025-01-15")), 0);
        assert_eq!(whole_years_between(d("2025-01-01"), d("2026-06-01")), 1);
        assert_eq!(whole_years_between(d("2025-01-01"), d("2027-01-01")), 2);
        assert_eq!(whole_years_between(d("2025-01-01"), d("2026-12-31")), 1);
        assert_eq!(whole_years_between(d("2025-01-01"), d("2024-06-01")), 0);
        assert_eq!(whole_years_between(d("2025-01-01"), d("2023-06-01")), -1);
        assert_eq!(whole_years_between(d("2025-01-01"), d("2022-01-01")), -3);
    }

    #[test]
    fn folder_due_this_year() {
        let s = compute_disposition(d("2020-01-15"), 5, d("2025-01-01")).unwrap();
        assert_eq!(s.disposition_date, d("2025-01-15"));
        assert_eq!(s.years_remaining, 0);
    }

    #[test]
    fn item_due_next_year() {
        let s = compute_disposition(d("2023-06-01"), 3, d("2025-01-01")).unwrap();
        assert_eq!(s.disposition_date, d("2026-06-01"));
        assert_eq!(s.years_remaining, 1);
    }

    #[test]
    fn zero_retention_has_no_schedule() {
        assert!(compute_disposition(d("2021-01-01"), 0, d("2025-01-01")).is_none());
    }

    #[test]
    fn reference_date_is_new_year() {
        assert_eq!(reference_date(2025), Some(d("2025-01-01")));
    }
}
