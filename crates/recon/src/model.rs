use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const SKU_COLUMN: &str = "Retail_Product_SKU";
pub const SOH_COLUMN: &str = "Retail_SOHQTY";
pub const CC_COLUMN: &str = "Retail_CCQTY";
pub const RFID_COLUMN: &str = "RFID";

/// Columns the expected (system-of-record) CSV must carry.
pub const EXPECTED_COLUMNS: [&str; 11] = [
    "Retail_Product_SKU",
    "Retail_Product_Color",
    "Retail_Product_Level1",
    "Retail_Product_Level1Name",
    "Retail_Product_Level2Name",
    "Retail_Product_Level3Name",
    "Retail_Product_Level4Name",
    "Retail_Product_Name",
    "Retail_Product_Size",
    "Retail_Product_Style",
    "Retail_SOHQTY",
];

/// Columns the counted (physical scan) CSV must carry.
pub const COUNTED_COLUMNS: [&str; 2] = ["RFID", "Retail_Product_SKU"];

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which of the two uploaded files a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Expected,
    Counted,
}

impl Dataset {
    /// Sentence-case label used in report messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expected => "Expected inventory",
            Self::Counted => "Counted inventory",
        }
    }

    /// Column that must be unique within this dataset.
    pub fn key_column(&self) -> &'static str {
        match self {
            Self::Expected => SKU_COLUMN,
            Self::Counted => RFID_COLUMN,
        }
    }

    /// Short key name used in the "has duplicates" message.
    pub fn key_label(&self) -> &'static str {
        match self {
            Self::Expected => "SKU",
            Self::Counted => "RFID",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Expected => &EXPECTED_COLUMNS,
            Self::Counted => &COUNTED_COLUMNS,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => write!(f, "expected inventory"),
            Self::Counted => write!(f, "counted inventory"),
        }
    }
}

/// A CSV file held as raw text: header row plus equal-width data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Fail on the first required column the header row lacks.
    pub fn require_columns(&self, dataset: Dataset, columns: &[&str]) -> Result<(), ReconError> {
        for column in columns {
            if self.column_index(column).is_none() {
                return Err(ReconError::MissingColumn {
                    dataset,
                    column: (*column).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Index of `name`, or a schema error naming the dataset.
    pub fn require_index(&self, dataset: Dataset, name: &str) -> Result<usize, ReconError> {
        self.column_index(name).ok_or_else(|| ReconError::MissingColumn {
            dataset,
            column: name.to_string(),
        })
    }
}

/// Cell texts read as a missing value, as spreadsheet and dataframe exports write them.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell holds no value: blank, whitespace, or one of [`NA_MARKERS`].
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || NA_MARKERS.contains(&trimmed)
}

/// Normalize a raw cell: missing values are null, anything else is kept verbatim.
pub fn cell_value(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Descriptive columns shared by expected and reconciled rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductDimensions {
    #[serde(rename = "Retail_Product_Color")]
    pub color: Option<String>,
    #[serde(rename = "Retail_Product_Level1")]
    pub level1: Option<String>,
    #[serde(rename = "Retail_Product_Level1Name")]
    pub level1_name: Option<String>,
    #[serde(rename = "Retail_Product_Level2Name")]
    pub level2_name: Option<String>,
    #[serde(rename = "Retail_Product_Level3Name")]
    pub level3_name: Option<String>,
    #[serde(rename = "Retail_Product_Level4Name")]
    pub level4_name: Option<String>,
    #[serde(rename = "Retail_Product_Name")]
    pub name: Option<String>,
    #[serde(rename = "Retail_Product_Size")]
    pub size: Option<String>,
    #[serde(rename = "Retail_Product_Style")]
    pub style: Option<String>,
}

/// One system-of-record row. `soh_qty` is still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRecord {
    pub sku: Option<String>,
    pub dimensions: ProductDimensions,
    pub soh_qty: Option<String>,
}

impl ExpectedRecord {
    /// Project a schema-checked expected table onto typed records.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, ReconError> {
        let ds = Dataset::Expected;
        let sku = table.require_index(ds, SKU_COLUMN)?;
        let soh = table.require_index(ds, SOH_COLUMN)?;
        let color = table.require_index(ds, "Retail_Product_Color")?;
        let level1 = table.require_index(ds, "Retail_Product_Level1")?;
        let level1_name = table.require_index(ds, "Retail_Product_Level1Name")?;
        let level2_name = table.require_index(ds, "Retail_Product_Level2Name")?;
        let level3_name = table.require_index(ds, "Retail_Product_Level3Name")?;
        let level4_name = table.require_index(ds, "Retail_Product_Level4Name")?;
        let name = table.require_index(ds, "Retail_Product_Name")?;
        let size = table.require_index(ds, "Retail_Product_Size")?;
        let style = table.require_index(ds, "Retail_Product_Style")?;

        let cell = |row: &[String], i: usize| row.get(i).and_then(|v| cell_value(v));

        Ok(table
            .rows
            .iter()
            .map(|row| ExpectedRecord {
                sku: cell(row, sku),
                dimensions: ProductDimensions {
                    color: cell(row, color),
                    level1: cell(row, level1),
                    level1_name: cell(row, level1_name),
                    level2_name: cell(row, level2_name),
                    level3_name: cell(row, level3_name),
                    level4_name: cell(row, level4_name),
                    name: cell(row, name),
                    size: cell(row, size),
                    style: cell(row, style),
                },
                soh_qty: cell(row, soh),
            })
            .collect())
    }
}

/// One physically scanned item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedRecord {
    pub rfid: Option<String>,
    pub sku: Option<String>,
}

impl CountedRecord {
    pub fn from_table(table: &Table) -> Result<Vec<Self>, ReconError> {
        let rfid = table.require_index(Dataset::Counted, RFID_COLUMN)?;
        let sku = table.require_index(Dataset::Counted, SKU_COLUMN)?;
        Ok(table
            .rows
            .iter()
            .map(|row| CountedRecord {
                rfid: row.get(rfid).and_then(|v| cell_value(v)),
                sku: row.get(sku).and_then(|v| cell_value(v)),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Physical count for one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedCount {
    #[serde(rename = "Retail_Product_SKU")]
    pub sku: String,
    #[serde(rename = "Retail_CCQTY")]
    pub cc_qty: i64,
    pub rfids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Reconciled rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkuSide {
    #[serde(rename = "CC Only")]
    CcOnly,
    #[serde(rename = "SOH Only")]
    SohOnly,
    #[serde(rename = "SOH & CC")]
    Both,
}

impl SkuSide {
    /// Which sources hold stock for a SKU. `None` when neither does.
    pub fn classify(soh_qty: i64, cc_qty: i64) -> Option<Self> {
        match (soh_qty > 0, cc_qty > 0) {
            (false, true) => Some(Self::CcOnly),
            (true, false) => Some(Self::SohOnly),
            (true, true) => Some(Self::Both),
            (false, false) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CcOnly => "CC Only",
            Self::SohOnly => "SOH Only",
            Self::Both => "SOH & CC",
        }
    }
}

impl fmt::Display for SkuSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the reconciled report, keyed by SKU.
///
/// `sku` is `None` only for expected stock recorded without a SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscrepancyRecord {
    #[serde(rename = "Retail_Product_SKU")]
    pub sku: Option<String>,
    #[serde(flatten)]
    pub dimensions: ProductDimensions,
    #[serde(rename = "Retail_SOHQTY")]
    pub soh_qty: i64,
    #[serde(rename = "Retail_CCQTY")]
    pub cc_qty: i64,
    #[serde(rename = "Diff")]
    pub diff: i64,
    #[serde(rename = "Unders")]
    pub unders: i64,
    #[serde(rename = "Overs")]
    pub overs: i64,
    #[serde(rename = "Match")]
    pub matched: u8,
    #[serde(rename = "SKUSide")]
    pub sku_side: Option<SkuSide>,
    #[serde(rename = "SKUAccuracy")]
    pub sku_accuracy: f64,
    #[serde(rename = "ItemAccuracy")]
    pub item_accuracy: f64,
    #[serde(rename = "UnitLevelAccuracy")]
    pub unit_level_accuracy: f64,
}

impl DiscrepancyRecord {
    /// Value of a groupable column; `None` is a null cell.
    pub fn dimension(&self, dim: Dimension) -> Option<&str> {
        let d = &self.dimensions;
        match dim {
            Dimension::Sku => self.sku.as_deref(),
            Dimension::Color => d.color.as_deref(),
            Dimension::Level1 => d.level1.as_deref(),
            Dimension::Level1Name => d.level1_name.as_deref(),
            Dimension::Level2Name => d.level2_name.as_deref(),
            Dimension::Level3Name => d.level3_name.as_deref(),
            Dimension::Level4Name => d.level4_name.as_deref(),
            Dimension::Name => d.name.as_deref(),
            Dimension::Size => d.size.as_deref(),
            Dimension::Style => d.style.as_deref(),
            Dimension::SkuSide => self.sku_side.map(|s| s.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Columns for grouping
// ---------------------------------------------------------------------------

/// A non-quantity column of the reconciled report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "Retail_Product_Color")]
    Color,
    #[serde(rename = "Retail_Product_Level1")]
    Level1,
    #[serde(rename = "Retail_Product_Level1Name")]
    Level1Name,
    #[serde(rename = "Retail_Product_Level2Name")]
    Level2Name,
    #[serde(rename = "Retail_Product_Level3Name")]
    Level3Name,
    #[serde(rename = "Retail_Product_Level4Name")]
    Level4Name,
    #[serde(rename = "Retail_Product_Name")]
    Name,
    #[serde(rename = "Retail_Product_SKU")]
    Sku,
    #[serde(rename = "Retail_Product_Size")]
    Size,
    #[serde(rename = "Retail_Product_Style")]
    Style,
    #[serde(rename = "SKUSide")]
    SkuSide,
}

impl Dimension {
    pub const ALL: [Dimension; 11] = [
        Self::Color,
        Self::Level1,
        Self::Level1Name,
        Self::Level2Name,
        Self::Level3Name,
        Self::Level4Name,
        Self::Name,
        Self::Sku,
        Self::Size,
        Self::Style,
        Self::SkuSide,
    ];

    /// Grouping used when nothing has been selected.
    pub const DEFAULT_GROUPING: [Dimension; 2] = [Self::Level1Name, Self::Level2Name];

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Color => "Retail_Product_Color",
            Self::Level1 => "Retail_Product_Level1",
            Self::Level1Name => "Retail_Product_Level1Name",
            Self::Level2Name => "Retail_Product_Level2Name",
            Self::Level3Name => "Retail_Product_Level3Name",
            Self::Level4Name => "Retail_Product_Level4Name",
            Self::Name => "Retail_Product_Name",
            Self::Sku => "Retail_Product_SKU",
            Self::Size => "Retail_Product_Size",
            Self::Style => "Retail_Product_Style",
            Self::SkuSide => "SKUSide",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.column_name() == s)
            .ok_or_else(|| ReconError::ConfigValidation(format!("unknown column '{s}'")))
    }
}

/// A numeric column of the reconciled report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Measure {
    #[serde(rename = "Retail_SOHQTY")]
    SohQty,
    #[serde(rename = "Retail_CCQTY")]
    CcQty,
    Diff,
    Unders,
    Overs,
    Match,
    #[serde(rename = "SKUAccuracy")]
    SkuAccuracy,
    ItemAccuracy,
    UnitLevelAccuracy,
}

impl Measure {
    pub const ALL: [Measure; 9] = [
        Self::SohQty,
        Self::CcQty,
        Self::Diff,
        Self::Unders,
        Self::Overs,
        Self::Match,
        Self::SkuAccuracy,
        Self::ItemAccuracy,
        Self::UnitLevelAccuracy,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::SohQty => SOH_COLUMN,
            Self::CcQty => CC_COLUMN,
            Self::Diff => "Diff",
            Self::Unders => "Unders",
            Self::Overs => "Overs",
            Self::Match => "Match",
            Self::SkuAccuracy => "SKUAccuracy",
            Self::ItemAccuracy => "ItemAccuracy",
            Self::UnitLevelAccuracy => "UnitLevelAccuracy",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Column sums for a set of reconciled rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    #[serde(rename = "Retail_SOHQTY")]
    pub soh_qty: i64,
    #[serde(rename = "Retail_CCQTY")]
    pub cc_qty: i64,
    #[serde(rename = "Diff")]
    pub diff: i64,
    #[serde(rename = "Unders")]
    pub unders: i64,
    #[serde(rename = "Overs")]
    pub overs: i64,
    #[serde(rename = "Match")]
    pub matched: i64,
    #[serde(rename = "SKUAccuracy")]
    pub sku_accuracy: f64,
    #[serde(rename = "ItemAccuracy")]
    pub item_accuracy: f64,
    #[serde(rename = "UnitLevelAccuracy")]
    pub unit_level_accuracy: f64,
}

impl Totals {
    /// Fold one reconciled row in. Quantity sums are checked.
    pub fn add(&mut self, row: &DiscrepancyRecord) -> Result<(), ReconError> {
        self.add_counts(
            [row.soh_qty, row.cc_qty, row.diff, row.unders, row.overs, i64::from(row.matched)],
            [row.sku_accuracy, row.item_accuracy, row.unit_level_accuracy],
        )
    }

    pub fn merge(&mut self, other: &Totals) -> Result<(), ReconError> {
        self.add_counts(
            [other.soh_qty, other.cc_qty, other.diff, other.unders, other.overs, other.matched],
            [other.sku_accuracy, other.item_accuracy, other.unit_level_accuracy],
        )
    }

    fn add_counts(&mut self, counts: [i64; 6], ratios: [f64; 3]) -> Result<(), ReconError> {
        let checked = |acc: i64, value: i64, measure: Measure| {
            acc.checked_add(value).ok_or(ReconError::TotalOverflow(measure))
        };
        // all-or-nothing: compute first, then assign
        let soh_qty = checked(self.soh_qty, counts[0], Measure::SohQty)?;
        let cc_qty = checked(self.cc_qty, counts[1], Measure::CcQty)?;
        let diff = checked(self.diff, counts[2], Measure::Diff)?;
        let unders = checked(self.unders, counts[3], Measure::Unders)?;
        let overs = checked(self.overs, counts[4], Measure::Overs)?;
        let matched = checked(self.matched, counts[5], Measure::Match)?;

        self.soh_qty = soh_qty;
        self.cc_qty = cc_qty;
        self.diff = diff;
        self.unders = unders;
        self.overs = overs;
        self.matched = matched;
        self.sku_accuracy += ratios[0];
        self.item_accuracy += ratios[1];
        self.unit_level_accuracy += ratios[2];
        Ok(())
    }

    pub fn get(&self, measure: Measure) -> f64 {
        match measure {
            Measure::SohQty => self.soh_qty as f64,
            Measure::CcQty => self.cc_qty as f64,
            Measure::Diff => self.diff as f64,
            Measure::Unders => self.unders as f64,
            Measure::Overs => self.overs as f64,
            Measure::Match => self.matched as f64,
            Measure::SkuAccuracy => self.sku_accuracy,
            Measure::ItemAccuracy => self.item_accuracy,
            Measure::UnitLevelAccuracy => self.unit_level_accuracy,
        }
    }
}

/// One distinct combination of the selected dimension values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRecord {
    /// Values in the same order as `GroupedTable::dimensions`.
    pub key: Vec<Option<String>>,
    pub sku_count: usize,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTable {
    pub dimensions: Vec<Dimension>,
    pub rows: Vec<GroupedRecord>,
}

impl GroupedTable {
    pub fn totals(&self) -> Result<Totals, ReconError> {
        let mut totals = Totals::default();
        for row in &self.rows {
            totals.merge(&row.totals)?;
        }
        Ok(totals)
    }

    /// Position of `dim` within the group key.
    pub fn key_index(&self, dim: Dimension) -> Option<usize> {
        self.dimensions.iter().position(|d| *d == dim)
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: Option<String>,
    pub value: f64,
}

/// One bar series of a grouped-bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub measure: Measure,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_axis: Dimension,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub stock_levels: BarChart,
    pub accuracy: BarChart,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Outcome of enforcing key uniqueness on one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    pub dataset: Dataset,
    pub key_column: String,
    pub total_rows: usize,
    pub distinct_keys: usize,
    pub dropped: usize,
}

impl DedupReport {
    pub fn has_duplicates(&self) -> bool {
        self.dropped > 0
    }
}

impl fmt::Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.dataset.label();
        let key = self.dataset.key_label();
        if self.has_duplicates() {
            writeln!(f, "{label} has duplicates {key} values")?;
            write!(f, "-    {} {} values were dropped", self.dropped, self.key_column)
        } else {
            write!(f, "{label} has not duplicate {key} values")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub total_skus: usize,
    pub matched_skus: usize,
    pub cc_only: usize,
    pub soh_only: usize,
    pub both: usize,
    pub unclassified: usize,
    /// Expected rows without a SKU, reported under a null SKU.
    pub unkeyed_expected: usize,
    /// Counted rows dropped for lacking a SKU.
    pub unkeyed_counted: usize,
    pub totals: Totals,
    /// Ratio of sums, not a sum of per-row ratios.
    pub overall_sku_accuracy: f64,
    pub overall_item_accuracy: f64,
    pub overall_unit_level_accuracy: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub report_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub expected_dedup: DedupReport,
    pub counted_dedup: DedupReport,
    #[serde(skip)]
    pub expected: Table,
    #[serde(skip)]
    pub counted: Table,
    pub counts: Vec<AggregatedCount>,
    pub discrepancies: Vec<DiscrepancyRecord>,
    pub summary: ReconSummary,
    pub grouped: GroupedTable,
    pub charts: ChartData,
}

impl ReconResult {
    /// Re-aggregate the reconciled rows under a different selection.
    pub fn regroup(&self, dimensions: &[Dimension]) -> Result<GroupedTable, ReconError> {
        crate::group::group(&self.discrepancies, dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_round_trips_header_names() {
        for dim in Dimension::ALL {
            assert_eq!(dim.column_name().parse::<Dimension>().unwrap(), dim);
        }
        assert!("Retail_SOHQTY".parse::<Dimension>().is_err());
    }

    #[test]
    fn sku_side_classification() {
        assert_eq!(SkuSide::classify(0, 3), Some(SkuSide::CcOnly));
        assert_eq!(SkuSide::classify(2, 0), Some(SkuSide::SohOnly));
        assert_eq!(SkuSide::classify(2, 3), Some(SkuSide::Both));
        assert_eq!(SkuSide::classify(0, 0), None);
    }

    #[test]
    fn cell_value_nulls() {
        assert_eq!(cell_value(""), None);
        assert_eq!(cell_value("   "), None);
        assert_eq!(cell_value("NaN"), None);
        for marker in ["NA", "N/A", "NULL", "null", "None", "#N/A", "<NA>", "n/a"] {
            assert_eq!(cell_value(marker), None, "{marker:?}");
        }
        assert_eq!(cell_value("Red"), Some("Red".to_string()));
        assert_eq!(cell_value("NAVY"), Some("NAVY".to_string()));
    }

    #[test]
    fn require_columns_names_first_missing() {
        let table = Table::new(vec!["RFID".into()]);
        let err = table.require_columns(Dataset::Counted, &COUNTED_COLUMNS).unwrap_err();
        assert_eq!(err.to_string(), "counted inventory: missing column 'Retail_Product_SKU'");
    }

    #[test]
    fn dedup_report_messages() {
        let report = DedupReport {
            dataset: Dataset::Expected,
            key_column: SKU_COLUMN.into(),
            total_rows: 3,
            distinct_keys: 2,
            dropped: 1,
        };
        assert_eq!(
            report.to_string(),
            "Expected inventory has duplicates SKU values\n-    1 Retail_Product_SKU values were dropped"
        );

        let clean = DedupReport { dropped: 0, distinct_keys: 3, ..report };
        assert_eq!(clean.to_string(), "Expected inventory has not duplicate SKU values");
    }
}
