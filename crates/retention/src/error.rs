use std::fmt;

#[derive(Debug)]
pub enum RetentionError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad reference year, no record sources, etc.).
    ConfigValidation(String),
    /// Missing required column in a CSV source.
    MissingColumn { source: String, column: String },
    /// A date that is present but cannot be parsed. Aborts the whole report.
    DateParse { kind: String, record_id: String, value: String },
    /// A numeric cell (retention years) that is not a non-negative integer.
    NumberParse { source: String, record_id: String, column: String, value: String },
    /// A final-disposition label that matches no known action.
    DispositionParse { source: String, record_id: String, value: String },
    /// IO error (file read, CSV framing, etc.).
    Io(String),
}

impl fmt::Display for RetentionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::DateParse { kind, record_id, value } => {
                write!(f, "{kind} '{record_id}': cannot parse date '{value}'")
            }
            Self::NumberParse { source, record_id, column, value } => {
                write!(
                    f,
                    "source '{source}', record '{record_id}': column '{column}' is not a retention in years: '{value}'"
                )
            }
            Self::DispositionParse { source, record_id, value } => {
                write!(f, "source '{source}', record '{record_id}': unknown final disposition '{value}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for RetentionError {}
