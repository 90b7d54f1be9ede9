//! Plain-text rendering of a disposition report: header, four-cell summary,
//! then the "due now" and "approaching" sections.

use arsip_retention::format::format_date_id;
use arsip_retention::{Report, ReportRow};

use crate::util::render_table;

pub(crate) const EMPTY_MESSAGE: &str = "Tidak ada arsip yang mendekati masa penyusutan.";

const OVERDUE_TITLE: &str = "Arsip yang sudah jatuh tempo penyusutan";
const APPROACHING_TITLE: &str = "Arsip yang mendekati masa penyusutan";

const HEADERS: [&str; 10] = [
    "No",
    "Jenis",
    "Kode",
    "Nama / Uraian",
    "Unit Pengolah",
    "Tgl Arsip",
    "Retensi A/I",
    "Tgl Penyusutan",
    "Keterangan",
    "Lokasi",
];

const MAX_CELL_WIDTH: usize = 32;

pub(crate) fn render_text(name: &str, report: &Report, unit: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str(&format!("LAPORAN PENYUSUTAN ARSIP: {name}\n"));
    out.push_str(&format!(
        "Tanggal acuan: {} | Ambang peringatan: {} thn\n",
        format_date_id(report.meta.reference_date),
        report.meta.warning_window_years,
    ));
    if let Some(unit) = unit {
        out.push_str(&format!("Unit pengolah: {unit}\n"));
    }
    out.push('\n');

    let s = &report.summary;
    out.push_str("Ringkasan\n");
    out.push_str(&format!("  Jatuh tempo        : {}\n", s.total_overdue));
    out.push_str(&format!("  Mendekati          : {}\n", s.total_approaching));
    out.push_str(&format!("  Untuk dimusnahkan  : {}\n", s.total_destroy_or_other));
    out.push_str(&format!("  Permanen           : {}\n", s.total_permanent));
    out.push('\n');

    if report.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    for (title, rows) in [(OVERDUE_TITLE, &report.overdue), (APPROACHING_TITLE, &report.approaching)] {
        out.push_str(&format!("{title} ({})\n", rows.len()));
        if rows.is_empty() {
            out.push_str("  -\n\n");
            continue;
        }
        let body: Vec<Vec<String>> = rows.iter().enumerate().map(|(i, r)| table_row(i + 1, r)).collect();
        out.push_str(&render_table(&HEADERS, &body, MAX_CELL_WIDTH));
        out.push('\n');
    }

    out
}

fn table_row(n: usize, row: &ReportRow) -> Vec<String> {
    let dash = || "-".to_string();
    vec![
        n.to_string(),
        row.kind.to_string(),
        row.classification_code.clone().unwrap_or_else(dash),
        row.name.clone(),
        row.processing_unit.clone().unwrap_or_else(dash),
        row.archival_date_label.clone(),
        format!("{}/{}", row.active_retention_years, row.inactive_retention_years),
        row.disposition_date_label.clone(),
        format!("{} ({})", row.remaining_label, row.disposition_label),
        row.location.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use arsip_retention::model::{
        ClassificationCode, DispositionAction, FolderRecord,
    };
    use chrono::NaiveDate;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn empty_report_shows_message_instead_of_tables() {
        let report = arsip_retention::assemble(&[], &[], reference(), 1).unwrap();
        let text = render_text("Kosong", &report, None);
        assert!(text.contains(EMPTY_MESSAGE));
        assert!(!text.contains(OVERDUE_TITLE));
        assert!(text.contains("Tanggal acuan: 1 Januari 2025"));
    }

    #[test]
    fn overdue_section_lists_rows() {
        let folder = FolderRecord {
            id: "B1".into(),
            name: "Berkas Pengadaan".into(),
            classification: Some(ClassificationCode {
                id: "2".into(),
                code: "KP.01".into(),
                description: "Pengadaan".into(),
                parent_id: None,
                active_retention_years: Some(2),
                inactive_retention_years: Some(3),
                final_disposition: Some(DispositionAction::Permanent),
                skkaad: None,
                group: None,
            }),
            processing_unit: Some("Bagian Umum".into()),
            active_retention_override: None,
            inactive_retention_override: None,
            disposition_override: None,
            created_at: "2020-01-15".into(),
            location: Some("Gudang A".into()),
        };
        let report = arsip_retention::assemble(&[folder], &[], reference(), 1).unwrap();
        let text = render_text("Uji", &report, Some("U1"));

        assert!(text.contains("Unit pengolah: U1"));
        assert!(text.contains(&format!("{OVERDUE_TITLE} (1)")));
        assert!(text.contains(&format!("{APPROACHING_TITLE} (0)")));
        assert!(text.contains("KP.01"));
        assert!(text.contains("0 thn terlambat (Permanen)"));
        assert!(text.contains("15 Januari 2025"));
        assert!(text.contains("Permanen           : 1"));
    }
}
