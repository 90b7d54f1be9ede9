use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

/// Final action taken on a record once its retention has run out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispositionAction {
    #[default]
    Destroy,
    Permanent,
    ReEvaluate,
}

impl DispositionAction {
    /// Parse a free-text label as entered by operators. Case-insensitive,
    /// accepts both the Indonesian and the English spelling.
    pub fn parse_label(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', " ");
        match normalized.as_str() {
            "musnah" | "destroy" => Some(Self::Destroy),
            "permanen" | "permanent" => Some(Self::Permanent),
            "dinilai kembali" | "dinilai ulang" | "reevaluate" | "re evaluate" => {
                Some(Self::ReEvaluate)
            }
            _ => None,
        }
    }

    /// Human label used on rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Destroy => "Musnah",
            Self::Permanent => "Permanen",
            Self::ReEvaluate => "Dinilai Kembali",
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent)
    }
}

impl std::fmt::Display for DispositionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Destroy => write!(f, "destroy"),
            Self::Permanent => write!(f, "permanent"),
            Self::ReEvaluate => write!(f, "re_evaluate"),
        }
    }
}

/// Classification code ("kode klasifikasi") with its default retention schedule.
///
/// Retention fields are nullable: a code used purely as a hierarchy node
/// usually carries no schedule at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCode {
    pub id: String,
    pub code: String,
    pub description: String,
    pub parent_id: Option<String>,
    pub active_retention_years: Option<u32>,
    pub inactive_retention_years: Option<u32>,
    pub final_disposition: Option<DispositionAction>,
    /// SKKAAD final-status label. Display only.
    pub skkaad: Option<String>,
    /// Root code of this code's parent chain. Display grouping only.
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingUnit {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Records (joined by the persistence layer before they reach the engine)
// ---------------------------------------------------------------------------

/// Physical folder ("berkas arsip"). Its creation timestamp is the archival
/// reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRecord {
    pub id: String,
    pub name: String,
    pub classification: Option<ClassificationCode>,
    pub processing_unit: Option<String>,
    pub active_retention_override: Option<u32>,
    pub inactive_retention_override: Option<u32>,
    pub disposition_override: Option<DispositionAction>,
    /// Raw timestamp text as stored upstream.
    pub created_at: String,
    pub location: Option<String>,
}

/// Single archival record ("arsip unit"). Has no disposition override of
/// its own; the action always comes from the classification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveItemRecord {
    pub id: String,
    pub description: String,
    pub classification: Option<ClassificationCode>,
    pub processing_unit: Option<String>,
    pub folder_id: Option<String>,
    pub active_retention_override: Option<u32>,
    pub inactive_retention_override: Option<u32>,
    /// Raw date text; falls back to `created_at` when absent.
    pub archival_date: Option<String>,
    pub created_at: String,
    pub room: Option<String>,
    pub cabinet: Option<String>,
    pub storage_box: Option<String>,
    pub folder_slot: Option<String>,
}

/// Pre-loaded records for one report request.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub folders: Vec<FolderRecord>,
    pub items: Vec<ArchiveItemRecord>,
}

// ---------------------------------------------------------------------------
// Resolution + scheduling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveRetention {
    pub active_years: u32,
    pub inactive_years: u32,
    pub disposition: DispositionAction,
}

impl EffectiveRetention {
    pub fn total_years(&self) -> u32 {
        self.active_years.saturating_add(self.inactive_years)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispositionSchedule {
    pub disposition_date: NaiveDate,
    /// Whole years from the reference date to the disposition date.
    /// Positive = still in the future, zero or negative = due.
    pub years_remaining: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Overdue,
    Approaching,
    NotDue,
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overdue => write!(f, "overdue"),
            Self::Approaching => write!(f, "approaching"),
            Self::NotDue => write!(f, "not_due"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Folder,
    Item,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// One report line. Same shape for folders and loose items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub kind: RowKind,
    pub classification_code: Option<String>,
    pub classification_description: Option<String>,
    pub classification_group: Option<String>,
    pub skkaad: Option<String>,
    pub name: String,
    pub processing_unit: Option<String>,
    pub archival_date: NaiveDate,
    pub archival_date_label: String,
    pub active_retention_years: u32,
    pub inactive_retention_years: u32,
    pub total_retention_years: u32,
    pub disposition_date: NaiveDate,
    pub disposition_date_label: String,
    pub years_remaining: i32,
    pub remaining_label: String,
    pub disposition_action: DispositionAction,
    pub disposition_label: String,
    pub location: String,
}

/// Overdue tally by final disposition. Approaching rows are never counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispositionTally {
    pub permanent: usize,
    pub destroy_or_other: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_overdue: usize,
    pub total_approaching: usize,
    pub total_permanent: usize,
    pub total_destroy_or_other: usize,
}

/// Records that produced no row, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionCounts {
    pub zero_retention: usize,
    pub missing_archival_date: usize,
    pub filed_in_folder: usize,
    pub not_due: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    pub reference_date: NaiveDate,
    pub warning_window_years: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub overdue: Vec<ReportRow>,
    pub approaching: Vec<ReportRow>,
    pub excluded: ExclusionCounts,
}

impl Report {
    /// Both sections empty. Renderers show an explicit message instead of tables.
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.approaching.is_empty()
    }
}
