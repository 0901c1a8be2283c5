// stockcount CLI - inventory discrepancy reports from two CSV snapshots

mod exit_codes;
mod report;
mod util;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use stockcount_recon::model::{Dimension, Measure};
use stockcount_recon::ReconError;

use exit_codes::{
    recon_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "stockcount")]
#[command(about = "Reconcile expected stock against an RFID cycle count")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the discrepancy report for an expected and a counted inventory file
    #[command(after_help = "\
Examples:
  stockcount report expected.csv counted.csv
  stockcount report expected.csv counted.csv --group-by Retail_Product_Color --json
  stockcount report expected.csv counted.csv -c store.toml --display-by Retail_Product_Level2Name
  stockcount report expected.csv counted.csv --encoding utf-8 --delimiter ';' --details")]
    Report {
        /// Expected inventory CSV (one row per SKU)
        expected: PathBuf,

        /// Counted inventory CSV (one row per RFID read)
        counted: PathBuf,

        /// Report config file (TOML)
        #[arg(long, short = 'c', env = "STOCKCOUNT_CONFIG")]
        config: Option<PathBuf>,

        /// Columns to group by, in order (repeatable or comma-separated)
        #[arg(long = "group-by", short = 'g')]
        group_by: Vec<String>,

        /// Grouped column used as the chart x-axis
        #[arg(long = "display-by")]
        display_by: Option<String>,

        /// Input text encoding: latin1, windows-1252, utf-8
        #[arg(long)]
        encoding: Option<String>,

        /// CSV delimiter
        #[arg(long)]
        delimiter: Option<char>,

        /// Emit one JSON document instead of text tables
        #[arg(long)]
        json: bool,

        /// Include the cleaned input tables
        #[arg(long = "show-inputs")]
        show_inputs: bool,

        /// Include the per-SKU discrepancy table
        #[arg(long)]
        details: bool,

        /// Row limit for input and detail tables in text output
        #[arg(long, default_value_t = 50)]
        rows: usize,
    },

    /// List the columns available for grouping and the reported measures
    Columns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a report config file without running a report
    Validate {
        /// Config file (TOML)
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();

    let result = match cli.command {
        None => {
            eprintln!("Usage: stockcount <command> [options]");
            eprintln!("       stockcount --help for more information");
            Ok(())
        }
        Some(Commands::Report {
            expected,
            counted,
            config,
            group_by,
            display_by,
            encoding,
            delimiter,
            json,
            show_inputs,
            details,
            rows,
        }) => report::cmd_report(report::ReportArgs {
            expected,
            counted,
            config,
            group_by,
            display_by,
            encoding,
            delimiter,
            json,
            show_inputs,
            details,
            rows,
        }),
        Some(Commands::Columns { json }) => cmd_columns(json),
        Some(Commands::Validate { config }) => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    /// Writing the report to stdout failed.
    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::Parse { .. } => {
                Some("check --encoding and --delimiter match the file".to_string())
            }
            ReconError::MissingColumn { .. } => {
                Some("run 'stockcount columns' for the expected header names".to_string())
            }
            ReconError::ConfigValidation(_) => {
                Some("run 'stockcount columns' for valid column names".to_string())
            }
            ReconError::DisplayNotGrouped(_) => {
                Some("add the column to --group-by or pick one of the grouped columns".to_string())
            }
            _ => None,
        };
        Self { code: recon_exit_code(&err), message: err.to_string(), hint }
    }
}

// ============================================================================
// columns
// ============================================================================

#[derive(Serialize)]
struct ColumnListing {
    dimensions: Vec<&'static str>,
    default_group_by: Vec<&'static str>,
    measures: Vec<&'static str>,
}

fn column_listing() -> ColumnListing {
    ColumnListing {
        dimensions: Dimension::ALL.iter().map(|d| d.column_name()).collect(),
        default_group_by: Dimension::DEFAULT_GROUPING.iter().map(|d| d.column_name()).collect(),
        measures: Measure::ALL.iter().map(|m| m.column_name()).collect(),
    }
}

fn cmd_columns(json: bool) -> Result<(), CliError> {
    let listing = column_listing();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let written = if json {
        serde_json::to_writer_pretty(&mut out, &listing)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(out))
    } else {
        write_column_listing(&mut out, &listing)
    };
    written.map_err(|e| CliError::output(e.to_string()))
}

fn write_column_listing(out: &mut impl Write, listing: &ColumnListing) -> std::io::Result<()> {
    writeln!(out, "Group-by columns:")?;
    for name in &listing.dimensions {
        let marker = if listing.default_group_by.contains(name) { "  (default)" } else { "" };
        writeln!(out, "  {name}{marker}")?;
    }
    writeln!(out)?;
    writeln!(out, "Measures:")?;
    for name in &listing.measures {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let config = report::load_config(&path)?;
    let group_by: Vec<String> = config.report.group_by.iter().map(|d| d.to_string()).collect();
    let display = config
        .report
        .display_column()
        .map(|d| d.to_string())
        .unwrap_or_default();

    println!("{}: ok", path.display());
    println!("  name:       {}", config.name);
    println!("  encoding:   {}", config.input.encoding);
    println!("  delimiter:  {}", config.input.delimiter);
    println!("  group_by:   {}", group_by.join(", "));
    println!("  display_by: {}", display);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcount_recon::model::Dataset;

    #[test]
    fn recon_errors_keep_exit_codes() {
        let err = CliError::from(ReconError::MissingColumn {
            dataset: Dataset::Counted,
            column: "RFID".into(),
        });
        assert_eq!(err.code, exit_codes::EXIT_SCHEMA);
        assert!(err.hint.is_some());

        let err = CliError::from(ReconError::QuantityParse { sku: "A".into(), value: "x".into() });
        assert_eq!(err.code, exit_codes::EXIT_QUANTITY);
        assert!(err.hint.is_none());
    }

    #[test]
    fn column_listing_marks_defaults() {
        let listing = column_listing();
        let mut out = Vec::new();
        write_column_listing(&mut out, &listing).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  Retail_Product_Level1Name  (default)"));
        assert!(text.contains("  SKUSide\n"));
        assert!(text.contains("  UnitLevelAccuracy"));
    }
}
