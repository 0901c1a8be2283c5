use crate::derived::divide_or_default;
use crate::error::ReconError;
use crate::model::{DiscrepancyRecord, ReconSummary, SkuSide, Totals};

/// Compute summary statistics from reconciled rows.
///
/// Overall accuracies are ratios of sums over the whole report, kept apart
/// from the grouped table where per-row ratios are summed.
pub fn compute_summary(rows: &[DiscrepancyRecord]) -> Result<ReconSummary, ReconError> {
    let mut summary = ReconSummary {
        total_skus: rows.len(),
        ..ReconSummary::default()
    };
    let mut totals = Totals::default();
    let mut stocked_skus = 0usize;
    let mut stocked_matches = 0usize;

    for r in rows {
        totals.add(r)?;
        if r.matched == 1 {
            summary.matched_skus += 1;
        }
        match r.sku_side {
            Some(SkuSide::CcOnly) => summary.cc_only += 1,
            Some(SkuSide::SohOnly) => summary.soh_only += 1,
            Some(SkuSide::Both) => summary.both += 1,
            None => summary.unclassified += 1,
        }
        if r.soh_qty > 0 {
            stocked_skus += 1;
            if r.matched == 1 {
                stocked_matches += 1;
            }
        }
    }

    let soh = totals.soh_qty as f64;
    summary.overall_sku_accuracy =
        divide_or_default(stocked_matches as f64, stocked_skus as f64, 0.0);
    summary.overall_item_accuracy = divide_or_default(totals.cc_qty as f64, soh, 0.0);
    summary.overall_unit_level_accuracy =
        divide_or_default((totals.soh_qty - totals.unders - totals.overs) as f64, soh, 0.0);
    summary.totals = totals;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::build_discrepancy;
    use crate::model::ProductDimensions;

    fn row(sku: &str, soh: i64, cc: i64) -> DiscrepancyRecord {
        build_discrepancy(Some(sku.into()), ProductDimensions::default(), soh, cc)
    }

    #[test]
    fn summary_counts() {
        let rows = vec![row("A", 5, 2), row("B", 0, 1), row("C", 3, 3), row("D", 2, 0), row("E", 0, 0)];
        let s = compute_summary(&rows).unwrap();
        assert_eq!(s.total_skus, 5);
        assert_eq!(s.matched_skus, 2);
        assert_eq!(s.both, 2);
        assert_eq!(s.cc_only, 1);
        assert_eq!(s.soh_only, 1);
        assert_eq!(s.unclassified, 1);
        assert_eq!(s.totals.soh_qty, 10);
        assert_eq!(s.totals.cc_qty, 6);
        assert_eq!(s.totals.unders, 5);
        assert_eq!(s.totals.overs, 1);
        // 1 of 3 stocked SKUs matched
        assert!((s.overall_sku_accuracy - 1.0 / 3.0).abs() < 1e-12);
        assert!((s.overall_item_accuracy - 0.6).abs() < 1e-12);
        assert!((s.overall_unit_level_accuracy - 0.4).abs() < 1e-12);
    }

    #[test]
    fn empty_report() {
        let s = compute_summary(&[]).unwrap();
        assert_eq!(s.total_skus, 0);
        assert_eq!(s.overall_item_accuracy, 0.0);
        assert_eq!(s.overall_sku_accuracy, 0.0);
    }

    #[test]
    fn stock_beyond_i64_is_an_error() {
        let rows = vec![row("A", i64::MAX, i64::MAX), row("B", i64::MAX, 0)];
        let err = compute_summary(&rows).unwrap_err();
        assert!(matches!(err, ReconError::TotalOverflow(crate::model::Measure::SohQty)));
    }
}
