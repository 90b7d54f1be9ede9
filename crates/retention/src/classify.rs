use crate::model::{Bucket, DispositionAction, DispositionTally};

/// Bucket a record by its signed remaining years.
///
/// - `years_remaining <= 0` → Overdue
/// - `0 < years_remaining <= window` → Approaching
/// - otherwise → NotDue (dropped from the report)
pub fn classify(years_remaining: i32, warning_window_years: u32) -> Bucket {
    if years_remaining <= 0 {
        Bucket::Overdue
    } else if i64::from(years_remaining) <= i64::from(warning_window_years) {
        Bucket::Approaching
    } else {
        Bucket::NotDue
    }
}

/// Tally overdue records by disposition. Only Permanent gets its own counter;
/// Destroy and ReEvaluate share the other one.
pub fn tally_overdue<I>(actions: I) -> DispositionTally
where
    I: IntoIterator<Item = DispositionAction>,
{
    actions
        .into_iter()
        .fold(DispositionTally::default(), |mut tally, action| {
            if action.is_permanent() {
                tally.permanent += 1;
            } else {
                tally.destroy_or_other += 1;
            }
            tally
        })
}
