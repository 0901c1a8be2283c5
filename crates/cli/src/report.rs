//! `stockcount report` - reconcile two inventory snapshots and print the report.

use std::io::Write;
use std::path::{Path, PathBuf};

use stockcount_recon::config::InputEncoding;
use stockcount_recon::model::{
    BarChart, DedupReport, Dimension, DiscrepancyRecord, GroupedTable, Measure, ReconSummary, Table,
};
use stockcount_recon::{ReconResult, ReconSession, ReportConfig};

use crate::util::{cell, fmt_percent, fmt_ratio, render_table};
use crate::CliError;

pub struct ReportArgs {
    pub expected: PathBuf,
    pub counted: PathBuf,
    pub config: Option<PathBuf>,
    pub group_by: Vec<String>,
    pub display_by: Option<String>,
    pub encoding: Option<String>,
    pub delimiter: Option<char>,
    pub json: bool,
    pub show_inputs: bool,
    pub details: bool,
    pub rows: usize,
}

pub fn cmd_report(args: ReportArgs) -> Result<(), CliError> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => ReportConfig::default(),
    };

    if let Some(ref enc) = args.encoding {
        config.input.encoding = enc.parse::<InputEncoding>()?;
    }
    if let Some(delim) = args.delimiter {
        config.input.delimiter = delim.to_string();
        config.input.delimiter_byte()?;
    }

    let mut session = ReconSession::new(config);

    let expected = read_input(&args.expected)?;
    session.set_expected(&expected)?;
    let counted = read_input(&args.counted)?;
    session.set_counted(&counted)?;

    let group_by = parse_columns(&args.group_by)?;
    if !group_by.is_empty() {
        session.select_group_by(group_by)?;
    }
    if let Some(ref display) = args.display_by {
        let dim = display
            .trim()
            .parse::<Dimension>()
            .map_err(|e| CliError::args(e.to_string()))?;
        session.select_display_by(dim)?;
    }

    let Some(result) = session.run()? else {
        return Err(CliError::args("both expected and counted inventory files are required"));
    };
    log::info!(
        "{}: {} SKUs in {} groups",
        result.meta.report_name,
        result.summary.total_skus,
        result.grouped.rows.len()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = if args.json {
        print_json(&mut out, &result, args.show_inputs)
    } else {
        print_human(&mut out, &result, &args)
    };
    written.map_err(|e| CliError::output(e.to_string()))
}

pub fn load_config(path: &Path) -> Result<ReportConfig, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    ReportConfig::from_toml(&text).map_err(|e| {
        CliError::config(format!("{}: {e}", path.display()))
            .with_hint("run 'stockcount columns' for valid column names")
    })
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))
}

/// Accept repeated flags and comma-separated lists alike.
fn parse_columns(args: &[String]) -> Result<Vec<Dimension>, CliError> {
    args.iter()
        .flat_map(|a| a.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Dimension>().map_err(|e| CliError::args(e.to_string())))
        .collect()
}

// ============================================================================
// JSON
// ============================================================================

fn print_json(out: &mut impl Write, result: &ReconResult, show_inputs: bool) -> std::io::Result<()> {
    let mut value = serde_json::to_value(result)?;
    if show_inputs {
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "inputs".into(),
                serde_json::json!({
                    "expected": result.expected,
                    "counted": result.counted,
                }),
            );
        }
    }
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)
}

// ============================================================================
// Human
// ============================================================================

fn print_human(out: &mut impl Write, result: &ReconResult, args: &ReportArgs) -> std::io::Result<()> {
    writeln!(out, "{}", result.meta.report_name)?;
    writeln!(out, "{}", "=".repeat(result.meta.report_name.chars().count()))?;

    if args.show_inputs {
        print_section(out, "Expected inventory data")?;
        write!(out, "{}", raw_table(&result.expected, args.rows))?;
        print_section(out, "Counted inventory data")?;
        write!(out, "{}", raw_table(&result.counted, args.rows))?;
    }

    print_section(out, "Handling Duplicates")?;
    print_dedup(out, &result.expected_dedup)?;
    print_dedup(out, &result.counted_dedup)?;

    print_section(out, "Summary")?;
    print_summary(out, &result.summary)?;

    if args.details {
        print_section(out, "Discrepancies")?;
        write!(out, "{}", discrepancy_table(&result.discrepancies, args.rows))?;
    }

    let dims: Vec<String> = result.grouped.dimensions.iter().map(|d| d.to_string()).collect();
    print_section(out, &format!("Grouped by {}", dims.join(", ")))?;
    write!(out, "{}", grouped_table(&result.grouped))?;

    print_chart(out, &result.charts.stock_levels, fmt_count)?;
    print_chart(out, &result.charts.accuracy, fmt_ratio)?;
    Ok(())
}

fn print_section(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn print_dedup(out: &mut impl Write, report: &DedupReport) -> std::io::Result<()> {
    writeln!(out, "{report}")
}

fn print_summary(out: &mut impl Write, s: &ReconSummary) -> std::io::Result<()> {
    writeln!(
        out,
        "SKUs:       {} ({} SOH & CC, {} SOH Only, {} CC Only, {} unclassified)",
        s.total_skus, s.both, s.soh_only, s.cc_only, s.unclassified
    )?;
    writeln!(out, "Matched:    {}", s.matched_skus)?;
    writeln!(
        out,
        "Units:      SOH {}, CC {}, overs {}, unders {}",
        s.totals.soh_qty, s.totals.cc_qty, s.totals.overs, s.totals.unders
    )?;
    writeln!(
        out,
        "Accuracy:   SKU {}, item {}, unit-level {}",
        fmt_percent(s.overall_sku_accuracy),
        fmt_percent(s.overall_item_accuracy),
        fmt_percent(s.overall_unit_level_accuracy)
    )?;
    if s.unkeyed_expected > 0 {
        writeln!(out, "No SKU:     {} expected rows, reported under a blank SKU", s.unkeyed_expected)?;
    }
    if s.unkeyed_counted > 0 {
        writeln!(out, "Skipped:    {} counted rows without a SKU", s.unkeyed_counted)?;
    }
    Ok(())
}

fn print_chart(
    out: &mut impl Write,
    chart: &BarChart,
    fmt: fn(f64) -> String,
) -> std::io::Result<()> {
    print_section(out, &chart.title)?;
    let mut headers = vec![chart.x_axis.to_string()];
    headers.extend(chart.series.iter().map(|s| s.measure.to_string()));

    let points = chart.series.first().map(|s| s.points.len()).unwrap_or(0);
    let rows: Vec<Vec<String>> = (0..points)
        .map(|i| {
            let x = chart.series[0].points[i].x.as_deref();
            let mut row = vec![cell(x)];
            row.extend(chart.series.iter().map(|s| fmt(s.points[i].value)));
            row
        })
        .collect();

    let numeric: Vec<usize> = (1..headers.len()).collect();
    write!(out, "{}", render_table(&headers, &rows, &numeric))
}

fn fmt_count(value: f64) -> String {
    format!("{value:.0}")
}

fn raw_table(table: &Table, limit: usize) -> String {
    let rows: Vec<Vec<String>> = table.rows.iter().take(limit).cloned().collect();
    let mut rendered = render_table(&table.headers, &rows, &[]);
    if table.len() > limit {
        rendered.push_str(&format!("... {} more rows\n", table.len() - limit));
    }
    rendered
}

fn measure_headers() -> impl Iterator<Item = String> {
    Measure::ALL.iter().map(|m| m.to_string())
}

fn discrepancy_table(rows: &[DiscrepancyRecord], limit: usize) -> String {
    let shown = [Dimension::Sku, Dimension::Level1Name, Dimension::Level2Name, Dimension::Name, Dimension::SkuSide];
    let mut headers: Vec<String> = shown.iter().map(|d| d.to_string()).collect();
    headers.extend(measure_headers());

    let body: Vec<Vec<String>> = rows
        .iter()
        .take(limit)
        .map(|r| {
            let mut row: Vec<String> = shown.iter().map(|d| cell(r.dimension(*d))).collect();
            row.extend([
                r.soh_qty.to_string(),
                r.cc_qty.to_string(),
                r.diff.to_string(),
                r.unders.to_string(),
                r.overs.to_string(),
                r.matched.to_string(),
                fmt_ratio(r.sku_accuracy),
                fmt_ratio(r.item_accuracy),
                fmt_ratio(r.unit_level_accuracy),
            ]);
            row
        })
        .collect();

    let numeric: Vec<usize> = (shown.len()..headers.len()).collect();
    let mut rendered = render_table(&headers, &body, &numeric);
    if rows.len() > limit {
        rendered.push_str(&format!("... {} more rows\n", rows.len() - limit));
    }
    rendered
}

fn grouped_table(grouped: &GroupedTable) -> String {
    let mut headers: Vec<String> = grouped.dimensions.iter().map(|d| d.to_string()).collect();
    headers.push("SKUs".into());
    headers.extend(measure_headers());

    let body: Vec<Vec<String>> = grouped
        .rows
        .iter()
        .map(|g| {
            let mut row: Vec<String> = g.key.iter().map(|k| cell(k.as_deref())).collect();
            row.push(g.sku_count.to_string());
            let t = &g.totals;
            row.extend([
                t.soh_qty.to_string(),
                t.cc_qty.to_string(),
                t.diff.to_string(),
                t.unders.to_string(),
                t.overs.to_string(),
                t.matched.to_string(),
                fmt_ratio(t.sku_accuracy),
                fmt_ratio(t.item_accuracy),
                fmt_ratio(t.unit_level_accuracy),
            ]);
            row
        })
        .collect();

    let numeric: Vec<usize> = (grouped.dimensions.len()..headers.len()).collect();
    render_table(&headers, &body, &numeric)
}
