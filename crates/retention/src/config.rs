use serde::Deserialize;

use crate::error::RetentionError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub name: String,
    /// Year whose January 1st is the reference date. Callers default it
    /// to the current year when absent.
    #[serde(default)]
    pub reference_year: Option<i32>,
    #[serde(default = "default_warning_window")]
    pub warning_window_years: u32,
    /// Restrict the report to one processing unit.
    #[serde(default)]
    pub unit_id: Option<String>,
    pub sources: SourcesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_warning_window() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Sources + Output
// ---------------------------------------------------------------------------

/// CSV files, relative to the config file's directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    pub classifications: String,
    pub units: String,
    #[serde(default)]
    pub folders: Option<String>,
    #[serde(default)]
    pub items: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

pub const MIN_REFERENCE_YEAR: i32 = 1900;
pub const MAX_REFERENCE_YEAR: i32 = 9999;
pub const MAX_WARNING_WINDOW_YEARS: u32 = 100;

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, RetentionError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| RetentionError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RetentionError> {
        if let Some(year) = self.reference_year {
            validate_reference_year(year)?;
        }

        validate_warning_window(self.warning_window_years)?;

        if self.sources.folders.is_none() && self.sources.items.is_none() {
            return Err(RetentionError::ConfigValidation(
                "at least one of sources.folders / sources.items is required".into(),
            ));
        }

        if let Some(unit) = &self.unit_id {
            if unit.trim().is_empty() {
                return Err(RetentionError::ConfigValidation("unit_id must not be empty".into()));
            }
        }

        Ok(())
    }
}

pub fn validate_reference_year(year: i32) -> Result<(), RetentionError> {
    if !(MIN_REFERENCE_YEAR..=MAX_REFERENCE_YEAR).contains(&year) {
        return Err(RetentionError::ConfigValidation(format!(
            "reference_year must be between {MIN_REFERENCE_YEAR} and {MAX_REFERENCE_YEAR}, got {year}"
        )));
    }
    Ok(())
}

pub fn validate_warning_window(years: u32) -> Result<(), RetentionError> {
    if years > MAX_WARNING_WINDOW_YEARS {
        return Err(RetentionError::ConfigValidation(format!(
            "warning_window_years must be at most {MAX_WARNING_WINDOW_YEARS}, got {years}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
