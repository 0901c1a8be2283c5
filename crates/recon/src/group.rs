use std::collections::BTreeMap;

use crate::config::validate_selection;
use crate::error::ReconError;
use crate::model::{Dimension, DiscrepancyRecord, GroupedRecord, GroupedTable, Totals};

/// Re-aggregate reconciled rows by the selected dimension columns.
///
/// Every numeric column is summed within a group, the accuracy ratios
/// included (a sum of ratios, not a recomputed ratio). Null dimension
/// values form their own group, so column totals survive any regrouping.
/// Groups are ordered by key with nulls first.
pub fn group(rows: &[DiscrepancyRecord], dimensions: &[Dimension]) -> Result<GroupedTable, ReconError> {
    validate_selection(dimensions)?;

    let mut groups: BTreeMap<Vec<Option<String>>, (usize, Totals)> = BTreeMap::new();
    for row in rows {
        let key: Vec<Option<String>> = dimensions
            .iter()
            .map(|d| row.dimension(*d).map(str::to_string))
            .collect();
        let entry = groups.entry(key).or_default();
        entry.0 += 1;
        entry.1.add(row)?;
    }

    log::debug!("grouped {} rows into {} groups by {:?}", rows.len(), groups.len(), dimensions);

    Ok(GroupedTable {
        dimensions: dimensions.to_vec(),
        rows: groups
            .into_iter()
            .map(|(key, (sku_count, totals))| GroupedRecord { key, sku_count, totals })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::build_discrepancy;
    use crate::model::{Measure, ProductDimensions, SkuSide};

    fn row(sku: &str, color: Option<&str>, size: &str, soh: i64, cc: i64) -> DiscrepancyRecord {
        build_discrepancy(
            Some(sku.into()),
            ProductDimensions {
                color: color.map(Into::into),
                size: Some(size.into()),
                ..ProductDimensions::default()
            },
            soh,
            cc,
        )
    }

    fn rows() -> Vec<DiscrepancyRecord> {
        vec![
            row("A", Some("Red"), "M", 5, 2),
            row("B", Some("Red"), "L", 1, 1),
            row("C", Some("Blue"), "M", 2, 4),
            row("D", None, "M", 0, 3),
        ]
    }

    #[test]
    fn single_dimension() {
        let table = group(&rows(), &[Dimension::Color]).unwrap();
        assert_eq!(table.rows.len(), 3);

        // None sorts first
        assert_eq!(table.rows[0].key, vec![None]);
        assert_eq!(table.rows[0].totals.cc_qty, 3);

        assert_eq!(table.rows[1].key, vec![Some("Blue".to_string())]);
        let red = &table.rows[2];
        assert_eq!(red.key, vec![Some("Red".to_string())]);
        assert_eq!(red.sku_count, 2);
        assert_eq!(red.totals.soh_qty, 6);
        assert_eq!(red.totals.cc_qty, 3);
        assert_eq!(red.totals.diff, -3);
        assert_eq!(red.totals.unders, 3);
        assert_eq!(red.totals.matched, 1);
        // sum of ratios: A=0.4, B=1.0
        assert!((red.totals.item_accuracy - 1.4).abs() < 1e-12);
        assert_eq!(red.totals.sku_accuracy, 1.0);
    }

    #[test]
    fn two_dimensions() {
        let table = group(&rows(), &[Dimension::Size, Dimension::Color]).unwrap();
        let keys: Vec<Vec<Option<String>>> = table.rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                vec![Some("L".into()), Some("Red".into())],
                vec![Some("M".into()), None],
                vec![Some("M".into()), Some("Blue".into())],
                vec![Some("M".into()), Some("Red".into())],
            ]
        );
    }

    #[test]
    fn group_by_sku_side() {
        let table = group(&rows(), &[Dimension::SkuSide]).unwrap();
        let keys: Vec<Option<String>> = table.rows.iter().map(|r| r.key[0].clone()).collect();
        assert_eq!(
            keys,
            vec![
                Some(SkuSide::CcOnly.to_string()),
                Some(SkuSide::Both.to_string()),
            ]
        );
    }

    #[test]
    fn totals_conserved() {
        let data = rows();
        let mut direct = Totals::default();
        for r in &data {
            direct.add(r).unwrap();
        }
        for dims in [vec![Dimension::Color], vec![Dimension::Size, Dimension::Sku]] {
            let grouped = group(&data, &dims).unwrap().totals().unwrap();
            assert_eq!(grouped.soh_qty, direct.soh_qty);
            assert_eq!(grouped.cc_qty, direct.cc_qty);
            assert_eq!(grouped.matched, direct.matched);
            assert!((grouped.item_accuracy - direct.item_accuracy).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_selection_rejected() {
        assert!(group(&rows(), &[]).is_err());
    }

    #[test]
    fn empty_rows() {
        let table = group(&[], &[Dimension::Color]).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.totals().unwrap(), Totals::default());
    }

    #[test]
    fn oversized_quantities_fail_instead_of_wrapping() {
        let data = vec![
            row("A", Some("Red"), "M", i64::MAX, 0),
            row("B", Some("Red"), "M", 1, 0),
        ];
        let err = group(&data, &[Dimension::Color]).unwrap_err();
        assert!(matches!(err, ReconError::TotalOverflow(Measure::SohQty)));
        assert_eq!(err.to_string(), "total Retail_SOHQTY exceeds the supported quantity range");

        // different groups do not overflow on their own
        let split = group(&data, &[Dimension::Sku]).unwrap();
        assert!(matches!(split.totals(), Err(ReconError::TotalOverflow(_))));
    }
}
