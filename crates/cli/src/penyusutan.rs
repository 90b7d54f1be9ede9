//! `arsip penyusutan`: disposition report from a TOML config and CSV sources.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::Subcommand;
use serde::Serialize;

use arsip_retention::config::{validate_reference_year, validate_warning_window};
use arsip_retention::load::load_report_input;
use arsip_retention::schedule::reference_date;
use arsip_retention::{Report, ReportConfig, RetentionError};

use crate::exit_codes::{
    retention_exit_code, EXIT_REPORT_INVALID_CONFIG, EXIT_REPORT_OVERDUE,
    EXIT_REPORT_RUNTIME,
};
use crate::render::render_text;
use crate::CliError;

#[derive(Subcommand)]
pub enum PenyusutanCommands {
    /// Build the disposition report from a TOML config file
    #[command(after_help = "\
Examples:
  arsip penyusutan run penyusutan.toml
  arsip penyusutan run penyusutan.toml --json
  arsip penyusutan run penyusutan.toml --reference-year 2026 --warning-window 2
  arsip penyusutan run penyusutan.toml --unit U1 --output report.json")]
    Run {
        /// Path to the report config file
        config: PathBuf,

        /// Output JSON to stdout instead of the text document
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Reference year (report is computed as of January 1st)
        #[arg(long)]
        reference_year: Option<i32>,

        /// Years ahead that count as "approaching"
        #[arg(long)]
        warning_window: Option<u32>,

        /// Only include records of this processing unit id
        #[arg(long)]
        unit: Option<String>,

        /// Exit non-zero when any record is already due
        #[arg(long)]
        fail_on_overdue: bool,
    },

    /// Validate a report config without running
    #[command(after_help = "\
Examples:
  arsip penyusutan validate penyusutan.toml")]
    Validate {
        /// Path to the report config file
        config: PathBuf,
    },
}

pub fn cmd_penyusutan(cmd: PenyusutanCommands) -> Result<(), CliError> {
    match cmd {
        PenyusutanCommands::Run {
            config,
            json,
            output,
            reference_year,
            warning_window,
            unit,
            fail_on_overdue,
        } => cmd_penyusutan_run(RunOptions {
            config_path: config,
            json_output: json,
            output_file: output,
            reference_year,
            warning_window,
            unit,
            fail_on_overdue,
        }),
        PenyusutanCommands::Validate { config } => cmd_penyusutan_validate(config),
    }
}

struct RunOptions {
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    reference_year: Option<i32>,
    warning_window: Option<u32>,
    unit: Option<String>,
    fail_on_overdue: bool,
}

/// JSON envelope: run metadata around the deterministic report.
#[derive(Serialize)]
struct RunOutput<'a> {
    name: &'a str,
    engine_version: &'static str,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_id: Option<&'a str>,
    report: &'a Report,
}

fn report_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn engine_err(err: RetentionError) -> CliError {
    let cli_err = report_err(retention_exit_code(&err), err.to_string());
    match err {
        RetentionError::DateParse { .. } => {
            cli_err.with_hint("dates must be YYYY-MM-DD, DD/MM/YYYY, YYYY-MM-DD HH:MM:SS, or RFC 3339")
        }
        RetentionError::DispositionParse { .. } => {
            cli_err.with_hint("use Musnah, Permanen, or Dinilai Kembali")
        }
        RetentionError::MissingColumn { .. } => {
            cli_err.with_hint("check the CSV header row; column names are matched exactly after trimming")
        }
        _ => cli_err,
    }
}

fn read_config(config_path: &Path) -> Result<ReportConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| report_err(EXIT_REPORT_RUNTIME, format!("cannot read config: {e}")))?;
    ReportConfig::from_toml(&config_str).map_err(engine_err)
}

fn cmd_penyusutan_run(opts: RunOptions) -> Result<(), CliError> {
    let config = read_config(&opts.config_path)?;

    let year = opts
        .reference_year
        .or(config.reference_year)
        .unwrap_or_else(|| chrono::Local::now().year());
    validate_reference_year(year).map_err(engine_err)?;
    let warning_window = opts.warning_window.unwrap_or(config.warning_window_years);
    validate_warning_window(warning_window).map_err(engine_err)?;
    let reference = reference_date(year).ok_or_else(|| {
        report_err(EXIT_REPORT_INVALID_CONFIG, format!("invalid reference year {year}"))
    })?;

    // Resolve source paths relative to the config file's directory
    let base_dir = opts.config_path.parent().unwrap_or_else(|| Path::new("."));
    let unit = opts.unit.as_deref().or(config.unit_id.as_deref());

    log::info!(
        "report '{}': reference {}, window {} thn, sources under {}",
        config.name,
        reference,
        warning_window,
        base_dir.display(),
    );

    let input = load_report_input(&config, base_dir, unit).map_err(engine_err)?;
    let report = arsip_retention::run(&input, reference, warning_window).map_err(engine_err)?;

    let output_file = opts
        .output_file
        .clone()
        .or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));

    if opts.json_output || output_file.is_some() {
        let envelope = RunOutput {
            name: &config.name,
            engine_version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
            unit_id: unit,
            report: &report,
        };
        let json_str = serde_json::to_string_pretty(&envelope)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            log::debug!("writing JSON envelope to {}", path.display());
            std::fs::write(path, &json_str)
                .map_err(|e| report_err(EXIT_REPORT_RUNTIME, format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }

        if opts.json_output {
            println!("{json_str}");
        }
    }

    if !opts.json_output {
        print!("{}", render_text(&config.name, &report, unit));
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "penyusutan {}: {} overdue ({} permanent, {} destroy/other), {} approaching",
        reference.year(),
        s.total_overdue,
        s.total_permanent,
        s.total_destroy_or_other,
        s.total_approaching,
    );

    if opts.fail_on_overdue && s.total_overdue > 0 {
        return Err(report_err(
            EXIT_REPORT_OVERDUE,
            format!("{} record(s) due for disposition", s.total_overdue),
        ));
    }

    Ok(())
}

fn cmd_penyusutan_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let sources = [config.sources.folders.as_deref(), config.sources.items.as_deref()]
        .into_iter()
        .flatten()
        .count();
    eprintln!(
        "valid: report '{}' with {} record source(s), warning window {} thn{}",
        config.name,
        sources,
        config.warning_window_years,
        config
            .reference_year
            .map(|y| format!(", reference year {y}"))
            .unwrap_or_default(),
    );
    Ok(())
}
