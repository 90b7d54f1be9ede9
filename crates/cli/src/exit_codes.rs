//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 60-69   | penyusutan       | Disposition report codes                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use arsip_retention::RetentionError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Penyusutan (60-69)
// =============================================================================

/// Config file is unparseable or fails validation.
pub const EXIT_REPORT_INVALID_CONFIG: u8 = 60;

/// Source file missing, CSV malformed, or a record carries an unparseable
/// date, retention number, or disposition label.
pub const EXIT_REPORT_RUNTIME: u8 = 61;

/// Overdue records present and `--fail-on-overdue` was passed.
pub const EXIT_REPORT_OVERDUE: u8 = 62;

/// Map an engine error to its exit code.
pub fn retention_exit_code(err: &RetentionError) -> u8 {
    match err {
        RetentionError::ConfigParse(_) | RetentionError::ConfigValidation(_) => {
            EXIT_REPORT_INVALID_CONFIG
        }
        RetentionError::MissingColumn { .. }
        | RetentionError::DateParse { .. }
        | RetentionError::NumberParse { .. }
        | RetentionError::DispositionParse { .. }
        | RetentionError::Io(_) => EXIT_REPORT_RUNTIME,
    }
}
