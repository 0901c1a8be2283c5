use crate::error::ReconError;
use crate::model::{BarChart, ChartData, ChartPoint, ChartSeries, Dimension, GroupedTable, Measure};

const STOCK_MEASURES: [Measure; 2] = [Measure::SohQty, Measure::CcQty];
const ACCURACY_MEASURES: [Measure; 3] = [
    Measure::SkuAccuracy,
    Measure::ItemAccuracy,
    Measure::UnitLevelAccuracy,
];

/// Bind a grouped table to the two report charts.
///
/// `display_by` only picks the x-axis; it must be one of the grouped
/// columns. Each grouped row becomes one point per series.
pub fn build_charts(grouped: &GroupedTable, display_by: Dimension) -> Result<ChartData, ReconError> {
    let x_idx = grouped
        .key_index(display_by)
        .ok_or_else(|| ReconError::DisplayNotGrouped(display_by.to_string()))?;

    Ok(ChartData {
        stock_levels: bar_chart("Stock levels", grouped, display_by, x_idx, &STOCK_MEASURES),
        accuracy: bar_chart("Accuracy", grouped, display_by, x_idx, &ACCURACY_MEASURES),
    })
}

fn bar_chart(
    title: &str,
    grouped: &GroupedTable,
    x_axis: Dimension,
    x_idx: usize,
    measures: &[Measure],
) -> BarChart {
    let series = measures
        .iter()
        .map(|&measure| ChartSeries {
            measure,
            points: grouped
                .rows
                .iter()
                .map(|row| ChartPoint {
                    x: row.key.get(x_idx).cloned().flatten(),
                    value: row.totals.get(measure),
                })
                .collect(),
        })
        .collect();

    BarChart {
        title: format!("{title} by {x_axis}"),
        x_axis,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::build_discrepancy;
    use crate::group::group;
    use crate::model::ProductDimensions;

    fn grouped() -> GroupedTable {
        let dims = |color: &str, size: &str| ProductDimensions {
            color: Some(color.into()),
            size: Some(size.into()),
            ..ProductDimensions::default()
        };
        let rows = vec![
            build_discrepancy(Some("A".into()), dims("Red", "M"), 5, 2),
            build_discrepancy(Some("B".into()), dims("Blue", "M"), 2, 2),
            build_discrepancy(Some("C".into()), dims("Blue", "L"), 4, 0),
        ];
        group(&rows, &[Dimension::Color, Dimension::Size]).unwrap()
    }

    #[test]
    fn binds_display_column() {
        let charts = build_charts(&grouped(), Dimension::Size).unwrap();
        assert_eq!(charts.stock_levels.x_axis, Dimension::Size);
        assert_eq!(charts.stock_levels.title, "Stock levels by Retail_Product_Size");
        assert_eq!(charts.stock_levels.series.len(), 2);
        assert_eq!(charts.accuracy.series.len(), 3);

        // groups: (Blue,L) (Blue,M) (Red,M)
        let soh = &charts.stock_levels.series[0];
        assert_eq!(soh.measure, Measure::SohQty);
        let xs: Vec<Option<&str>> = soh.points.iter().map(|p| p.x.as_deref()).collect();
        assert_eq!(xs, vec![Some("L"), Some("M"), Some("M")]);
        let values: Vec<f64> = soh.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![4.0, 2.0, 5.0]);
    }

    #[test]
    fn accuracy_series_values() {
        let charts = build_charts(&grouped(), Dimension::Color).unwrap();
        let item = &charts.accuracy.series[1];
        assert_eq!(item.measure, Measure::ItemAccuracy);
        assert!((item.points[2].value - 0.4).abs() < 1e-12);
        assert_eq!(item.points[1].value, 1.0);

        // Match / SOHQTY for (Blue, M): 1 / 2
        let sku = &charts.accuracy.series[0];
        assert_eq!(sku.measure, Measure::SkuAccuracy);
        assert_eq!(sku.points[1].value, 0.5);
    }

    #[test]
    fn display_must_be_grouped() {
        let err = build_charts(&grouped(), Dimension::Style).unwrap_err();
        assert!(matches!(err, ReconError::DisplayNotGrouped(ref c) if c == "Retail_Product_Style"));
    }
}
