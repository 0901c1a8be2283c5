use std::collections::HashSet;

use crate::error::ReconError;
use crate::model::{cell_value, Dataset, DedupReport, Table};

/// Keep the first row for each distinct value of `key_column`.
///
/// Keys compare by raw text, except that every missing-value spelling (blank,
/// `nan`, `NA`, ...) is one null key. `dropped == total_rows - distinct_keys`.
/// Rows sharing a key but differing elsewhere lose everything but the first.
pub fn dedup_table(
    dataset: Dataset,
    table: Table,
    key_column: &str,
) -> Result<(Table, DedupReport), ReconError> {
    let key_idx = table.require_index(dataset, key_column)?;
    let total_rows = table.rows.len();

    let Table { headers, rows } = table;
    let mut seen: HashSet<Option<String>> = HashSet::with_capacity(rows.len());
    let mut kept = Vec::with_capacity(rows.len());

    for (i, row) in rows.into_iter().enumerate() {
        let key = row.get(key_idx).and_then(|v| cell_value(v));
        if seen.insert(key.clone()) {
            kept.push(row);
        } else {
            log::debug!("{dataset}: dropping row {} with duplicate {key_column} {key:?}", i + 1);
        }
    }

    let report = DedupReport {
        dataset,
        key_column: key_column.to_string(),
        total_rows,
        distinct_keys: seen.len(),
        dropped: total_rows - kept.len(),
    };

    if report.has_duplicates() {
        log::info!("{dataset}: {} duplicate {key_column} rows dropped", report.dropped);
    }

    Ok((Table { headers, rows: kept }, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> Table {
        Table {
            headers: vec!["RFID".into(), "Retail_Product_SKU".into()],
            rows: rows.iter().map(|(a, b)| vec![a.to_string(), b.to_string()]).collect(),
        }
    }

    #[test]
    fn no_duplicates() {
        let (out, report) =
            dedup_table(Dataset::Counted, table(&[("1", "A"), ("2", "A")]), "RFID").unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(report.dropped, 0);
        assert!(!report.has_duplicates());
    }

    #[test]
    fn keeps_first_occurrence() {
        let input = table(&[("1", "A"), ("2", "B"), ("1", "C"), ("1", "D")]);
        let (out, report) = dedup_table(Dataset::Counted, input, "RFID").unwrap();
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.distinct_keys, 2);
        assert_eq!(report.dropped, 2);
        assert_eq!(out.rows, vec![vec!["1", "A"], vec!["2", "B"]]);
    }

    #[test]
    fn missing_keys_collapse_to_one() {
        let input = table(&[("", "A"), ("nan", "B"), ("3", "C"), ("NA", "D"), ("  ", "E")]);
        let (out, report) = dedup_table(Dataset::Counted, input, "RFID").unwrap();
        assert_eq!(report.distinct_keys, 2);
        assert_eq!(report.dropped, 3);
        assert_eq!(out.rows, vec![vec!["", "A"], vec!["3", "C"]]);
        assert_eq!(report.dropped, report.total_rows - report.distinct_keys);
    }

    #[test]
    fn second_pass_drops_nothing() {
        let input = table(&[("1", "A"), ("1", "B"), ("2", "C")]);
        let (once, _) = dedup_table(Dataset::Counted, input, "RFID").unwrap();
        let (twice, report) = dedup_table(Dataset::Counted, once.clone(), "RFID").unwrap();
        assert_eq!(report.dropped, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_key_column() {
        let err = dedup_table(Dataset::Expected, table(&[]), "Retail_SOHQTY").unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { .. }));
    }
}
