//! Report assembly: folders and loose items run through
//! resolve → schedule → classify and come out as one row shape.
//!
//! Invariants:
//! - A record contributes at most one row. Items filed in a folder
//!   (`folder_id` set) are skipped; the folder represents them.
//! - Both sections are sorted ascending by `years_remaining` with a stable
//!   sort, so ties keep encounter order (folders first, then items).
//! - No clock reads. Same input + same reference date → equal report.

use chrono::NaiveDate;

use crate::classify::{classify, tally_overdue};
use crate::error::RetentionError;
use crate::format::{folder_location, format_date_id, item_location, remaining_label};
use crate::model::{
    ArchiveItemRecord, Bucket, ClassificationCode, DispositionSchedule, EffectiveRetention,
    ExclusionCounts, FolderRecord, Report, ReportInput, ReportMeta, ReportRow, ReportSummary,
    RowKind,
};
use crate::resolve::{resolve_folder, resolve_item};
use crate::schedule::{compute_disposition, parse_record_date};

/// Either kind of source record, before it is flattened into a [`Candidate`].
#[derive(Debug, Clone, Copy)]
pub enum SourceRecord<'a> {
    Folder(&'a FolderRecord),
    Item(&'a ArchiveItemRecord),
}

/// A source record reduced to what the pipeline needs.
struct Candidate<'a> {
    id: &'a str,
    kind: RowKind,
    classification: Option<&'a ClassificationCode>,
    name: &'a str,
    processing_unit: Option<&'a str>,
    raw_archival_date: &'a str,
    retention: EffectiveRetention,
    location: String,
}

impl<'a> SourceRecord<'a> {
    fn into_candidate(self) -> Candidate<'a> {
        match self {
            Self::Folder(f) => Candidate {
                id: &f.id,
                kind: RowKind::Folder,
                classification: f.classification.as_ref(),
                name: &f.name,
                processing_unit: f.processing_unit.as_deref(),
                raw_archival_date: &f.created_at,
                retention: resolve_folder(f),
                location: folder_location(f.location.as_deref()),
            },
            Self::Item(i) => Candidate {
                id: &i.id,
                kind: RowKind::Item,
                classification: i.classification.as_ref(),
                name: &i.description,
                processing_unit: i.processing_unit.as_deref(),
                raw_archival_date: match i.archival_date.as_deref() {
                    Some(d) if !d.trim().is_empty() => d,
                    _ => &i.created_at,
                },
                retention: resolve_item(i),
                location: item_location(
                    i.room.as_deref(),
                    i.cabinet.as_deref(),
                    i.storage_box.as_deref(),
                ),
            },
        }
    }
}

fn is_filed(item: &ArchiveItemRecord) -> bool {
    item.folder_id.as_deref().is_some_and(|id| !id.trim().is_empty())
}

/// Build the disposition report for one request.
///
/// Fails only on a present-but-unparseable date; every other data gap
/// (missing classification, zero retention, missing date) degrades to an
/// exclusion or a default.
pub fn assemble(
    folders: &[FolderRecord],
    items: &[ArchiveItemRecord],
    reference_date: NaiveDate,
    warning_window_years: u32,
) -> Result<Report, RetentionError> {
    let mut excluded = ExclusionCounts::default();
    let mut overdue = Vec::new();
    let mut approaching = Vec::new();

    let mut sources: Vec<SourceRecord<'_>> = folders.iter().map(SourceRecord::Folder).collect();
    for item in items {
        if is_filed(item) {
            log::debug!("item '{}': filed in folder, represented by the folder row", item.id);
            excluded.filed_in_folder += 1;
            continue;
        }
        sources.push(SourceRecord::Item(item));
    }

    for source in sources {
        let candidate = source.into_candidate();
        let kind = candidate.kind.to_string();

        let Some(archival_date) = parse_record_date(&kind, candidate.id, candidate.raw_archival_date)?
        else {
            log::debug!("{kind} '{}': no archival date, skipped", candidate.id);
            excluded.missing_archival_date += 1;
            continue;
        };

        let total = candidate.retention.total_years();
        if total == 0 {
            log::debug!("{kind} '{}': retention not configured, skipped", candidate.id);
            excluded.zero_retention += 1;
            continue;
        }

        let Some(schedule) = compute_disposition(archival_date, total, reference_date) else {
            excluded.not_due += 1;
            continue;
        };

        match classify(schedule.years_remaining, warning_window_years) {
            Bucket::Overdue => {
                overdue.push(build_row(candidate, archival_date, schedule, Bucket::Overdue))
            }
            Bucket::Approaching => approaching.push(build_row(
                candidate,
                archival_date,
                schedule,
                Bucket::Approaching,
            )),
            Bucket::NotDue => excluded.not_due += 1,
        }
    }

    // Stable: ties stay in encounter order.
    overdue.sort_by_key(|r| r.years_remaining);
    approaching.sort_by_key(|r| r.years_remaining);

    let tally = tally_overdue(overdue.iter().map(|r| r.disposition_action));
    let summary = ReportSummary {
        total_overdue: overdue.len(),
        total_approaching: approaching.len(),
        total_permanent: tally.permanent,
        total_destroy_or_other: tally.destroy_or_other,
    };

    log::info!(
        "disposition report {}: {} overdue ({} permanent, {} destroy/other), {} approaching",
        reference_date,
        summary.total_overdue,
        summary.total_permanent,
        summary.total_destroy_or_other,
        summary.total_approaching,
    );

    Ok(Report {
        meta: ReportMeta {
            reference_date,
            warning_window_years,
        },
        summary,
        overdue,
        approaching,
        excluded,
    })
}

/// [`assemble`] over a pre-loaded [`ReportInput`].
pub fn run(
    input: &ReportInput,
    reference_date: NaiveDate,
    warning_window_years: u32,
) -> Result<Report, RetentionError> {
    assemble(&input.folders, &input.items, reference_date, warning_window_years)
}

fn build_row(
    candidate: Candidate<'_>,
    archival_date: NaiveDate,
    schedule: DispositionSchedule,
    bucket: Bucket,
) -> ReportRow {
    let retention = candidate.retention;
    let classification = candidate.classification;
    ReportRow {
        id: candidate.id.to_string(),
        kind: candidate.kind,
        classification_code: classification.map(|c| c.code.clone()),
        classification_description: classification.map(|c| c.description.clone()),
        classification_group: classification.and_then(|c| c.group.clone()),
        skkaad: classification.and_then(|c| c.skkaad.clone()),
        name: candidate.name.to_string(),
        processing_unit: candidate.processing_unit.map(str::to_string),
        archival_date,
        archival_date_label: format_date_id(archival_date),
        active_retention_years: retention.active_years,
        inactive_retention_years: retention.inactive_years,
        total_retention_years: retention.total_years(),
        disposition_date: schedule.disposition_date,
        disposition_date_label: format_date_id(schedule.disposition_date),
        years_remaining: schedule.years_remaining,
        remaining_label: remaining_label(schedule.years_remaining, bucket),
        disposition_action: retention.disposition,
        disposition_label: retention.disposition.label().to_string(),
        location: candidate.location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DispositionAction;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn code(active: u32, inactive: u32, action: DispositionAction) -> ClassificationCode {
        ClassificationCode {
            id: format!("k_{active}_{inactive}"),
            code: "KP.01".into(),
            description: "Kepegawaian".into(),
            parent_id: None,
            active_retention_years: Some(active),
            inactive_retention_years: Some(inactive),
            final_disposition: Some(action),
            skkaad: Some("Biasa".into()),
            group: Some("KP".into()),
        }
    }

    fn folder(id: &str, created_at: &str, classification: Option<ClassificationCode>) -> FolderRecord {
        FolderRecord {
            id: id.into(),
            name: format!("Berkas {id}"),
            classification,
            processing_unit: Some("Bagian Umum".into()),
            active_retention_override: None,
            inactive_retention_override: None,
            disposition_override: None,
            created_at: created_at.into(),
            location: Some("Gudang A".into()),
        }
    }

    fn item(id: &str, archival_date: Option<&str>, classification: Option<ClassificationCode>) -> ArchiveItemRecord {
        ArchiveItemRecord {
            id: id.into(),
            description: format!("Surat {id}"),
            classification,
            processing_unit: Some("Bagian Umum".into()),
            folder_id: None,
            active_retention_override: None,
            inactive_retention_override: None,
            archival_date: archival_date.map(str::to_string),
            created_at: String::new(),
            room: Some("R.1".into()),
            cabinet: None,
            storage_box: Some("Box 2".into()),
            folder_slot: None,
        }
    }

    #[test]
    fn folder_due_this_year_is_overdue_and_permanent() {
        let folders = vec![folder("b1", "2020-01-15 09:00:00", Some(code(2, 3, DispositionAction::Permanent)))];
        let report = assemble(&folders, &[], d("2025-01-01"), 1).unwrap();

        assert_eq!(report.overdue.len(), 1);
        let row = &report.overdue[0];
        assert_eq!(row.kind, RowKind::Folder);
        assert_eq!(row.disposition_date, d("2025-01-15"));
        assert_eq!(row.years_remaining, 0);
        assert_eq!(row.disposition_date_label, "15 Januari 2025");
        assert_eq!(row.remaining_label, "0 thn terlambat");
        assert_eq!(row.location, "Gudang A");
        assert_eq!(report.summary.total_permanent, 1);
        assert_eq!(report.summary.total_destroy_or_other, 0);
    }

    #[test]
    fn item_within_window_is_approaching_and_untallied() {
        let items = vec![item("a1", Some("2023-06-01"), Some(code(1, 2, DispositionAction::Permanent)))];
        let report = assemble(&[], &items, d("2025-01-01"), 1).unwrap();

        assert!(report.overdue.is_empty());
        assert_eq!(report.approaching.len(), 1);
        let row = &report.approaching[0];
        assert_eq!(row.disposition_date, d("2026-06-01"));
        assert_eq!(row.remaining_label, "1 thn lagi");
        assert_eq!(row.location, "R.1, Box 2");
        assert_eq!(report.summary.total_permanent, 0);
        assert_eq!(report.summary.total_destroy_or_other, 0);
    }

    #[test]
    fn zero_retention_is_excluded() {
        let items = vec![item("a1", Some("2021-01-01"), Some(code(0, 0, DispositionAction::Destroy)))];
        let report = assemble(&[], &items, d("2025-01-01"), 1).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.excluded.zero_retention, 1);
    }

    #[test]
    fn filed_item_is_represented_by_its_folder_only() {
        let folders = vec![folder("b1", "2019-03-01", Some(code(2, 2, DispositionAction::Destroy)))];
        let mut filed = item("a1", Some("2010-01-01"), Some(code(1, 1, DispositionAction::Destroy)));
        filed.folder_id = Some("b1".into());
        let report = assemble(&folders, &[filed], d("2025-01-01"), 1).unwrap();

        assert_eq!(report.overdue.len(), 1);
        assert_eq!(report.overdue[0].id, "b1");
        assert_eq!(report.overdue[0].disposition_date, d("2023-03-01"));
        assert_eq!(report.excluded.filed_in_folder, 1);
    }

    #[test]
    fn reevaluate_counts_as_destroy_or_other() {
        let folders = vec![folder("b1", "2015-05-05", Some(code(3, 2, DispositionAction::ReEvaluate)))];
        let report = assemble(&folders, &[], d("2025-01-01"), 1).unwrap();
        assert_eq!(report.overdue[0].disposition_action, DispositionAction::ReEvaluate);
        assert_eq!(report.overdue[0].disposition_label, "Dinilai Kembali");
        assert_eq!(report.summary.total_permanent, 0);
        assert_eq!(report.summary.total_destroy_or_other, 1);
    }

    #[test]
    fn missing_archival_date_falls_back_to_created_at() {
        let mut i = item("a1", None, Some(code(2, 2, DispositionAction::Destroy)));
        i.created_at = "2018-07-01".into();
        let report = assemble(&[], &[i], d("2025-01-01"), 1).unwrap();
        assert_eq!(report.overdue[0].archival_date, d("2018-07-01"));
    }

    #[test]
    fn no_date_at_all_is_excluded() {
        let i = item("a1", Some(""), Some(code(2, 2, DispositionAction::Destroy)));
        let report = assemble(&[], &[i], d("2025-01-01"), 1).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.excluded.missing_archival_date, 1);
    }

    #[test]
    fn malformed_date_fails_the_whole_report() {
        let folders = vec![folder("b1", "2020-01-15", Some(code(2, 3, DispositionAction::Permanent)))];
        let items = vec![item("a9", Some("kemarin"), Some(code(1, 1, DispositionAction::Destroy)))];
        let err = assemble(&folders, &items, d("2025-01-01"), 1).unwrap_err();
        assert!(matches!(err, RetentionError::DateParse { ref record_id, .. } if record_id == "a9"));
    }

    #[test]
    fn missing_classification_still_produces_row_when_overridden() {
        let mut f = folder("b1", "2010-01-01", None);
        f.active_retention_override = Some(5);
        let report = assemble(&[f], &[], d("2025-01-01"), 1).unwrap();
        let row = &report.overdue[0];
        assert_eq!(row.classification_code, None);
        assert_eq!(row.disposition_action, DispositionAction::Destroy);
        assert_eq!(row.years_remaining, -10);
        assert_eq!(row.remaining_label, "10 thn terlambat");
    }

    #[test]
    fn rows_sorted_most_overdue_first_with_stable_ties() {
        let c = code(1, 1, DispositionAction::Destroy);
        let folders = vec![
            folder("b_new", "2022-06-01", Some(c.clone())),
            folder("b_old", "2015-06-01", Some(c.clone())),
        ];
        let items = vec![
            item("a_tie", Some("2022-06-01"), Some(c.clone())),
            item("a_oldest", Some("2001-06-01"), Some(c.clone())),
        ];
        let report = assemble(&folders, &items, d("2025-01-01"), 1).unwrap();
        let ids: Vec<&str> = report.overdue.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a_oldest", "b_old", "b_new", "a_tie"]);
    }

    #[test]
    fn beyond_window_is_dropped() {
        let items = vec![item("a1", Some("2024-03-01"), Some(code(2, 1, DispositionAction::Destroy)))];
        // due 2027-03-01, two whole years after the reference date
        let report = assemble(&[], &items, d("2025-01-01"), 1).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.excluded.not_due, 1);

        let report = assemble(&[], &items, d("2025-01-01"), 2).unwrap();
        assert_eq!(report.approaching.len(), 1);
    }

    #[test]
    fn run_matches_assemble() {
        let input = ReportInput {
            folders: vec![folder("b1", "2020-01-15", Some(code(2, 3, DispositionAction::Permanent)))],
            items: vec![item("a1", Some("2023-06-01"), Some(code(1, 2, DispositionAction::Destroy)))],
        };
        let a = run(&input, d("2025-01-01"), 1).unwrap();
        let b = assemble(&input.folders, &input.items, d("2025-01-01"), 1).unwrap();
        assert_eq!(a, b);
    }
}
