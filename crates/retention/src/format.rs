//! Presentation helpers for report rows. The sign flip of `years_remaining`
//! happens here and nowhere else.

use chrono::{Datelike, NaiveDate};

use crate::model::Bucket;

const MONTHS_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// Indonesian long date, e.g. `15 Januari 2020`.
pub fn format_date_id(date: NaiveDate) -> String {
    let month = MONTHS_ID[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// `"N thn terlambat"` for overdue rows, `"N thn lagi"` for approaching ones.
pub fn remaining_label(years_remaining: i32, bucket: Bucket) -> String {
    match bucket {
        Bucket::Overdue => format!("{} thn terlambat", years_remaining.unsigned_abs()),
        Bucket::Approaching | Bucket::NotDue => format!("{years_remaining} thn lagi"),
    }
}

/// Room, cabinet and box joined with ", ", blanks skipped.
pub fn item_location(room: Option<&str>, cabinet: Option<&str>, storage_box: Option<&str>) -> String {
    let parts: Vec<&str> = [room, cabinet, storage_box]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        "-".into()
    } else {
        parts.join(", ")
    }
}

pub fn folder_location(location: Option<&str>) -> String {
    match location.map(str::trim) {
        Some(loc) if !loc.is_empty() => loc.to_string(),
        _ => "-".into(),
    }
}
