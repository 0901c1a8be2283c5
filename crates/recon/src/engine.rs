use crate::aggregate::aggregate_counts;
use crate::chart::build_charts;
use crate::config::ReportConfig;
use crate::dedup::dedup_table;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::group::group;
use crate::model::{CountedRecord, Dataset, ExpectedRecord, ReconMeta, ReconResult, Table};
use crate::reconcile::reconcile;

/// The two uploaded snapshots, parsed but not yet validated.
#[derive(Debug, Clone)]
pub struct ReconInput {
    pub expected: Table,
    pub counted: Table,
}

/// Run the whole pipeline: schema check, dedup, aggregate, reconcile, group.
///
/// Pure over its inputs; nothing from a previous run is reused.
pub fn run(config: &ReportConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    // Both schemas are checked before any row is touched
    input
        .expected
        .require_columns(Dataset::Expected, Dataset::Expected.required_columns())?;
    input
        .counted
        .require_columns(Dataset::Counted, Dataset::Counted.required_columns())?;

    let (expected, expected_dedup) = dedup_table(
        Dataset::Expected,
        input.expected.clone(),
        Dataset::Expected.key_column(),
    )?;
    let (counted, counted_dedup) = dedup_table(
        Dataset::Counted,
        input.counted.clone(),
        Dataset::Counted.key_column(),
    )?;

    let expected_records = ExpectedRecord::from_table(&expected)?;
    let counted_records = CountedRecord::from_table(&counted)?;

    let aggregated = aggregate_counts(&counted_records);
    let reconciled = reconcile(&expected_records, &aggregated.counts)?;

    let mut summary = compute_summary(&reconciled.rows)?;
    summary.unkeyed_expected = reconciled.unkeyed;
    summary.unkeyed_counted = aggregated.unkeyed;

    let grouped = group(&reconciled.rows, &config.report.group_by)?;
    let display_by = config.report.display_column().ok_or_else(|| {
        ReconError::ConfigValidation("at least one grouping column is required".into())
    })?;
    let charts = build_charts(&grouped, display_by)?;

    Ok(ReconResult {
        meta: ReconMeta {
            report_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        expected_dedup,
        counted_dedup,
        expected,
        counted,
        counts: aggregated.counts,
        discrepancies: reconciled.rows,
        summary,
        grouped,
        charts,
    })
}
