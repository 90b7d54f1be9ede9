//! Effective retention: record override, then classification code, then a
//! hard default (0 years, Destroy).
//!
//! A missing classification code is not an error. Every field falls through
//! to its default and the record still flows into the report.

use crate::model::{
    ArchiveItemRecord, ClassificationCode, DispositionAction, EffectiveRetention, FolderRecord,
};

/// The one place the precedence chain is defined.
pub fn resolve(
    active_override: Option<u32>,
    inactive_override: Option<u32>,
    disposition_override: Option<DispositionAction>,
    classification: Option<&ClassificationCode>,
) -> EffectiveRetention {
    let active_years = active_override
        .or_else(|| classification.and_then(|c| c.active_retention_years))
        .unwrap_or(0);
    let inactive_years = inactive_override
        .or_else(|| classification.and_then(|c| c.inactive_retention_years))
        .unwrap_or(0);
    let disposition = disposition_override
        .or_else(|| classification.and_then(|c| c.final_disposition))
        .unwrap_or_default();

    EffectiveRetention {
        active_years,
        inactive_years,
        disposition,
    }
}

pub fn resolve_folder(folder: &FolderRecord) -> EffectiveRetention {
    resolve(
        folder.active_retention_override,
        folder.inactive_retention_override,
        folder.disposition_override,
        folder.classification.as_ref(),
    )
}

/// Items never override the disposition action.
pub fn resolve_item(item: &ArchiveItemRecord) -> EffectiveRetention {
    resolve(
        item.active_retention_override,
        item.inactive_retention_override,
        None,
        item.classification.as_ref(),
    )
}
