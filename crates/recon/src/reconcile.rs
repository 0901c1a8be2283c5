use std::collections::BTreeMap;

use crate::derived::{build_discrepancy, parse_quantity};
use crate::error::ReconError;
use crate::model::{AggregatedCount, DiscrepancyRecord, ExpectedRecord, ProductDimensions};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutput {
    pub rows: Vec<DiscrepancyRecord>,
    /// Expected rows with no SKU. The first is reported under a null SKU.
    pub unkeyed: usize,
}

/// Full outer join of expected stock against physical counts on SKU.
///
/// The absent side's quantity fills to 0 before derived columns are
/// computed. Output has one row per SKU in either input, ordered by SKU
/// with the null SKU first. Expected rows must already be unique per SKU.
pub fn reconcile(
    expected: &[ExpectedRecord],
    counts: &[AggregatedCount],
) -> Result<ReconcileOutput, ReconError> {
    let mut unkeyed = 0;
    let mut expected_map: BTreeMap<Option<&str>, &ExpectedRecord> = BTreeMap::new();
    for record in expected {
        let sku = record.sku.as_deref();
        if sku.is_none() {
            unkeyed += 1;
        }
        expected_map.entry(sku).or_insert(record);
    }
    if unkeyed > 0 {
        log::warn!("{unkeyed} expected rows have no SKU; their stock is reported under a blank SKU");
    }

    let count_map: BTreeMap<Option<&str>, i64> =
        counts.iter().map(|c| (Some(c.sku.as_str()), c.cc_qty)).collect();

    let mut rows = Vec::with_capacity(expected_map.len() + count_map.len());

    for (sku, record) in &expected_map {
        let soh_qty = parse_quantity(sku.unwrap_or(""), record.soh_qty.as_deref())?;
        let cc_qty = count_map.get(sku).copied().unwrap_or(0);
        rows.push(build_discrepancy(
            sku.map(str::to_string),
            record.dimensions.clone(),
            soh_qty,
            cc_qty,
        ));
    }

    for (sku, cc_qty) in &count_map {
        if !expected_map.contains_key(sku) {
            rows.push(build_discrepancy(
                sku.map(str::to_string),
                ProductDimensions::default(),
                0,
                *cc_qty,
            ));
        }
    }

    rows.sort_by(|a, b| a.sku.cmp(&b.sku));

    log::info!(
        "reconciled {} SKUs ({} expected, {} counted)",
        rows.len(),
        expected_map.len(),
        count_map.len()
    );

    Ok(ReconcileOutput { rows, unkeyed })
}
