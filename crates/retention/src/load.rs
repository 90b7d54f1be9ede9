//! CSV adapter standing in for the persistence layer: loads master data and
//! records, joins each record with its classification code and unit name,
//! and applies the optional unit filter before anything reaches the engine.
//!
//! Dates are passed through as raw text. Parsing them is the engine's job.

use std::collections::HashMap;
use std::path::Path;

use crate::config::ReportConfig;
use crate::error::RetentionError;
use crate::hierarchy::ClassificationTree;
use crate::model::{
    ArchiveItemRecord, ClassificationCode, DispositionAction, FolderRecord, ProcessingUnit,
    ReportInput,
};

// ---------------------------------------------------------------------------
// CSV plumbing
// ---------------------------------------------------------------------------

struct Table {
    source: &'static str,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl Table {
    fn parse(source: &'static str, csv_data: &str) -> Result<Self, RetentionError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| RetentionError::Io(format!("{source}: {e}")))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RetentionError::Io(format!("{source}: {e}")))?;

        Ok(Self { source, headers, records })
    }

    fn required(&self, column: &str) -> Result<usize, RetentionError> {
        self.optional(column).ok_or_else(|| RetentionError::MissingColumn {
            source: self.source.into(),
            column: column.into(),
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }
}

/// Non-blank cell value. Blank and absent columns are both `None`.
fn cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn text(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

fn parse_years(
    source: &str,
    record_id: &str,
    column: &str,
    value: Option<String>,
) -> Result<Option<u32>, RetentionError> {
    value
        .map(|v| {
            v.parse::<u32>().map_err(|_| RetentionError::NumberParse {
                source: source.into(),
                record_id: record_id.into(),
                column: column.into(),
                value: v.clone(),
            })
        })
        .transpose()
}

fn parse_disposition(
    source: &str,
    record_id: &str,
    value: Option<String>,
) -> Result<Option<DispositionAction>, RetentionError> {
    value
        .map(|v| {
            DispositionAction::parse_label(&v).ok_or_else(|| RetentionError::DispositionParse {
                source: source.into(),
                record_id: record_id.into(),
                value: v.clone(),
            })
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

/// Load classification codes. `group` is filled from the parent hierarchy.
pub fn load_classifications(csv_data: &str) -> Result<Vec<ClassificationCode>, RetentionError> {
    let table = Table::parse("classifications", csv_data)?;
    let id_idx = table.required("id")?;
    let code_idx = table.required("code")?;
    let description_idx = table.required("description")?;
    let active_idx = table.required("active_retention")?;
    let inactive_idx = table.required("inactive_retention")?;
    let disposition_idx = table.required("final_disposition")?;
    let parent_idx = table.optional("parent_id");
    let skkaad_idx = table.optional("skkaad");

    let mut codes = Vec::with_capacity(table.records.len());
    for record in &table.records {
        let id = text(record, id_idx);
        codes.push(ClassificationCode {
            code: text(record, code_idx),
            description: text(record, description_idx),
            parent_id: cell(record, parent_idx),
            active_retention_years: parse_years(
                table.source,
                &id,
                "active_retention",
                cell(record, Some(active_idx)),
            )?,
            inactive_retention_years: parse_years(
                table.source,
                &id,
                "inactive_retention",
                cell(record, Some(inactive_idx)),
            )?,
            final_disposition: parse_disposition(table.source, &id, cell(record, Some(disposition_idx)))?,
            skkaad: cell(record, skkaad_idx),
            group: None,
            id,
        });
    }

    Ok(ClassificationTree::new(&codes).with_groups(&codes))
}

pub fn load_units(csv_data: &str) -> Result<Vec<ProcessingUnit>, RetentionError> {
    let table = Table::parse("units", csv_data)?;
    let id_idx = table.required("id")?;
    let name_idx = table.required("name")?;

    Ok(table
        .records
        .iter()
        .map(|r| ProcessingUnit {
            id: text(r, id_idx),
            name: text(r, name_idx),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Joins
// ---------------------------------------------------------------------------

/// Lookup tables used while loading records.
pub struct Joins<'a> {
    classifications: HashMap<&'a str, &'a ClassificationCode>,
    units: HashMap<&'a str, &'a str>,
    unit_filter: Option<&'a str>,
}

impl<'a> Joins<'a> {
    pub fn new(
        classifications: &'a [ClassificationCode],
        units: &'a [ProcessingUnit],
        unit_filter: Option<&'a str>,
    ) -> Self {
        Self {
            classifications: classifications.iter().map(|c| (c.id.as_str(), c)).collect(),
            units: units.iter().map(|u| (u.id.as_str(), u.name.as_str())).collect(),
            unit_filter,
        }
    }

    fn keeps(&self, unit_id: &str) -> bool {
        self.unit_filter.map_or(true, |wanted| wanted == unit_id)
    }

    fn classification(&self, kind: &str, record_id: &str, id: Option<&str>) -> Option<ClassificationCode> {
        let id = id?;
        let found = self.classifications.get(id).map(|c| (*c).clone());
        if found.is_none() {
            log::warn!("{kind} '{record_id}': unknown classification '{id}', using defaults");
        }
        found
    }

    fn unit_name(&self, kind: &str, record_id: &str, id: &str) -> Option<String> {
        let found = self.units.get(id).map(|n| n.to_string());
        if found.is_none() && !id.is_empty() {
            log::warn!("{kind} '{record_id}': unknown processing unit '{id}'");
        }
        found
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn load_folders(csv_data: &str, joins: &Joins<'_>) -> Result<Vec<FolderRecord>, RetentionError> {
    let table = Table::parse("folders", csv_data)?;
    let id_idx = table.required("id")?;
    let name_idx = table.required("name")?;
    let classification_idx = table.required("classification_id")?;
    let unit_idx = table.required("unit_id")?;
    let created_idx = table.required("created_at")?;
    let active_idx = table.optional("active_retention");
    let inactive_idx = table.optional("inactive_retention");
    let disposition_idx = table.optional("final_disposition");
    let location_idx = table.optional("location");

    let mut folders = Vec::new();
    for record in &table.records {
        let unit_id = text(record, unit_idx);
        if !joins.keeps(&unit_id) {
            continue;
        }
        let id = text(record, id_idx);
        folders.push(FolderRecord {
            name: text(record, name_idx),
            classification: joins.classification(
                "folder",
                &id,
                cell(record, Some(classification_idx)).as_deref(),
            ),
            processing_unit: joins.unit_name("folder", &id, &unit_id),
            active_retention_override: parse_years(
                table.source,
                &id,
                "active_retention",
                cell(record, active_idx),
            )?,
            inactive_retention_override: parse_years(
                table.source,
                &id,
                "inactive_retention",
                cell(record, inactive_idx),
            )?,
            disposition_override: parse_disposition(table.source, &id, cell(record, disposition_idx))?,
            created_at: text(record, created_idx),
            location: cell(record, location_idx),
            id,
        });
    }

    Ok(folders)
}

pub fn load_items(csv_data: &str, joins: &Joins<'_>) -> Result<Vec<ArchiveItemRecord>, RetentionError> {
    let table = Table::parse("items", csv_data)?;
    let id_idx = table.required("id")?;
    let description_idx = table.required("description")?;
    let classification_idx = table.required("classification_id")?;
    let unit_idx = table.required("unit_id")?;
    let created_idx = table.required("created_at")?;
    let folder_idx = table.optional("folder_id");
    let active_idx = table.optional("active_retention");
    let inactive_idx = table.optional("inactive_retention");
    let archival_idx = table.optional("archival_date");
    let room_idx = table.optional("room");
    let cabinet_idx = table.optional("cabinet");
    let box_idx = table.optional("box");
    let slot_idx = table.optional("folder_slot");

    let mut items = Vec::new();
    for record in &table.records {
        let unit_id = text(record, unit_idx);
        if !joins.keeps(&unit_id) {
            continue;
        }
        let id = text(record, id_idx);
        items.push(ArchiveItemRecord {
            description: text(record, description_idx),
            classification: joins.classification(
                "item",
                &id,
                cell(record, Some(classification_idx)).as_deref(),
            ),
            processing_unit: joins.unit_name("item", &id, &unit_id),
            folder_id: cell(record, folder_idx),
            active_retention_override: parse_years(
                table.source,
                &id,
                "active_retention",
                cell(record, active_idx),
            )?,
            inactive_retention_override: parse_years(
                table.source,
                &id,
                "inactive_retention",
                cell(record, inactive_idx),
            )?,
            archival_date: cell(record, archival_idx),
            created_at: text(record, created_idx),
            room: cell(record, room_idx),
            cabinet: cell(record, cabinet_idx),
            storage_box: cell(record, box_idx),
            folder_slot: cell(record, slot_idx),
            id,
        });
    }

    Ok(items)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn read_source(base_dir: &Path, file: &str) -> Result<String, RetentionError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| RetentionError::Io(format!("cannot read {}: {e}", path.display())))
}

/// Read every source named in `config`, relative to `base_dir`.
/// `unit_filter` overrides the config's `unit_id` when given.
pub fn load_report_input(
    config: &ReportConfig,
    base_dir: &Path,
    unit_filter: Option<&str>,
) -> Result<ReportInput, RetentionError> {
    let classifications = load_classifications(&read_source(base_dir, &config.sources.classifications)?)?;
    let units = load_units(&read_source(base_dir, &config.sources.units)?)?;
    let unit_filter = unit_filter.or(config.unit_id.as_deref());
    let joins = Joins::new(&classifications, &units, unit_filter);

    let folders = match &config.sources.folders {
        Some(file) => load_folders(&read_source(base_dir, file)?, &joins)?,
        None => Vec::new(),
    };
    let items = match &config.sources.items {
        Some(file) => load_items(&read_source(base_dir, file)?, &joins)?,
        None => Vec::new(),
    };

    log::info!(
        "loaded {} classification(s), {} unit(s), {} folder(s), {} item(s){}",
        classifications.len(),
        units.len(),
        folders.len(),
        items.len(),
        unit_filter.map(|u| format!(" for unit '{u}'")).unwrap_or_default(),
    );

    Ok(ReportInput { folders, items })
}
