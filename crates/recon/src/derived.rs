//! Derived discrepancy columns computed from a filled (SOHQTY, CCQTY) pair.

use crate::error::ReconError;
use crate::model::{is_missing, DiscrepancyRecord, ProductDimensions, SkuSide};

/// `numerator / denominator`, or `default` when the denominator is zero.
pub fn divide_or_default(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 {
        default
    } else {
        numerator / denominator
    }
}

/// Parse a quantity cell.
///
/// Missing cells (absent side of the join, blank, `NA`-style markers) are 0. Whole
/// numbers are accepted with or without a `.0` fraction; anything else,
/// including negative stock, is an error.
pub fn parse_quantity(sku: &str, raw: Option<&str>) -> Result<i64, ReconError> {
    let Some(raw) = raw else {
        return Ok(0);
    };
    if is_missing(raw) {
        return Ok(0);
    }
    let text = raw.trim();

    let err = || ReconError::QuantityParse {
        sku: sku.to_string(),
        value: raw.to_string(),
    };

    let value = match text.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f: f64 = text.parse().map_err(|_| err())?;
            if !f.is_finite() || f.fract() != 0.0 || f.abs() > i64::MAX as f64 {
                return Err(err());
            }
            f as i64
        }
    };

    if value < 0 {
        return Err(err());
    }
    Ok(value)
}

/// Build the reconciled row for one SKU from its filled quantities.
pub fn build_discrepancy(
    sku: Option<String>,
    dimensions: ProductDimensions,
    soh_qty: i64,
    cc_qty: i64,
) -> DiscrepancyRecord {
    let diff = cc_qty - soh_qty;
    let unders = if diff < 0 { -diff } else { 0 };
    let overs = if diff > 0 { diff } else { 0 };
    let matched: u8 = if diff == 0 { 1 } else { 0 };

    let soh = soh_qty as f64;
    let sku_accuracy = divide_or_default(f64::from(matched), soh, 0.0);
    let item_accuracy = divide_or_default(cc_qty as f64, soh, 0.0);
    let unit_level_accuracy = divide_or_default((soh_qty - unders - overs) as f64, soh, 0.0);

    DiscrepancyRecord {
        sku,
        dimensions,
        soh_qty,
        cc_qty,
        diff,
        unders,
        overs,
        matched,
        sku_side: SkuSide::classify(soh_qty, cc_qty),
        sku_accuracy,
        item_accuracy,
        unit_level_accuracy,
    }
}
