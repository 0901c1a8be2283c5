use std::collections::BTreeMap;

use crate::model::{AggregatedCount, CountedRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateOutput {
    pub counts: Vec<AggregatedCount>,
    /// Scanned rows with no SKU; they cannot join and are left out.
    pub unkeyed: usize,
}

/// Group scanned items by SKU and count them. Ordered by SKU.
///
/// Expects RFID-deduplicated input, so each row is one physical item.
/// SKUs that were never scanned get no row here.
pub fn aggregate_counts(rows: &[CountedRecord]) -> AggregateOutput {
    let mut groups: BTreeMap<&str, (i64, Vec<String>)> = BTreeMap::new();
    let mut unkeyed = 0;

    for row in rows {
        let Some(sku) = row.sku.as_deref() else {
            unkeyed += 1;
            continue;
        };
        let entry = groups.entry(sku).or_insert_with(|| (0, Vec::new()));
        entry.0 += 1;
        if let Some(ref rfid) = row.rfid {
            entry.1.push(rfid.clone());
        }
    }

    if unkeyed > 0 {
        log::warn!("{unkeyed} counted rows have no SKU and were left out of the count");
    }

    let counts = groups
        .into_iter()
        .map(|(sku, (cc_qty, rfids))| AggregatedCount {
            sku: sku.to_string(),
            cc_qty,
            rfids,
        })
        .collect();

    AggregateOutput { counts, unkeyed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(rfid: &str, sku: &str) -> CountedRecord {
        CountedRecord {
            rfid: Some(rfid.into()),
            sku: if sku.is_empty() { None } else { Some(sku.into()) },
        }
    }

    #[test]
    fn counts_per_sku() {
        let rows = vec![scan("1", "A"), scan("2", "A"), scan("3", "B")];
        let out = aggregate_counts(&rows);
        assert_eq!(out.counts.len(), 2);
        assert_eq!(out.counts[0].sku, "A");
        assert_eq!(out.counts[0].cc_qty, 2);
        assert_eq!(out.counts[0].rfids, vec!["1", "2"]);
        assert_eq!(out.counts[1].sku, "B");
        assert_eq!(out.counts[1].cc_qty, 1);
        assert_eq!(out.unkeyed, 0);
    }

    #[test]
    fn ordered_by_sku() {
        let rows = vec![scan("1", "Z"), scan("2", "M"), scan("3", "A")];
        let skus: Vec<String> = aggregate_counts(&rows).counts.into_iter().map(|c| c.sku).collect();
        assert_eq!(skus, vec!["A", "M", "Z"]);
    }

    #[test]
    fn missing_sku_excluded() {
        let rows = vec![scan("1", "A"), scan("2", "")];
        let out = aggregate_counts(&rows);
        assert_eq!(out.counts.len(), 1);
        assert_eq!(out.unkeyed, 1);
    }

    #[test]
    fn empty_input() {
        let out = aggregate_counts(&[]);
        assert!(out.counts.is_empty());
    }
}
