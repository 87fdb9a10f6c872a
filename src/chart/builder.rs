use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::{columns, CellValue, PassengerTable};
use crate::data::projection::NumericView;
use crate::data::stats::pearson;

use super::mode::AnalysisMode;
use super::spec::{
    BarGroup, BarMode, ChartSpec, ColorScale, Dimension, DragMode, GroupedHistogramSpec,
    HeatmapSpec, HistogramBin, HistogramSpec, ScatterMatrixSpec,
};

pub const HISTOGRAM_BINS: usize = 30;
pub const SCATTER_MARKER_SIZE: f32 = 5.0;

// ---------------------------------------------------------------------------
// Dispatch: one chart per analysis mode
// ---------------------------------------------------------------------------

/// Build the chart for `mode`. Pure: equal inputs give equal specs.
pub fn build_chart(table: &PassengerTable, numeric: &NumericView, mode: AnalysisMode) -> ChartSpec {
    let title = mode.title().to_string();
    match mode {
        AnalysisMode::AgeDistribution => histogram(table, columns::AGE, title),
        AnalysisMode::FareDistribution => histogram(table, columns::FARE, title),
        AnalysisMode::SurvivalByClass => {
            grouped_histogram(table, columns::CLASS, columns::SURVIVED, title)
        }
        AnalysisMode::SurvivalByGender => {
            grouped_histogram(table, columns::SEX, columns::SURVIVED, title)
        }
        AnalysisMode::CorrelationHeatmap => correlation_heatmap(numeric, title),
        AnalysisMode::ScatterMatrix => scatter_matrix(numeric, title),
    }
}

fn histogram(table: &PassengerTable, column: &str, title: String) -> ChartSpec {
    let values = table.numeric_values(column);
    ChartSpec::Histogram(HistogramSpec {
        title,
        column: column.to_string(),
        nbins: HISTOGRAM_BINS,
        bins: bin_values(&values, HISTOGRAM_BINS),
    })
}

/// Equal-width bins spanning `[min, max]`; the last bin is closed so the
/// maximum lands in it. A constant series gets one unit-wide bin.
pub fn bin_values(values: &[f64], nbins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || nbins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len() as u64,
        }];
    }

    let width = (max - min) / nbins as f64;
    let mut bins: Vec<HistogramBin> = (0..nbins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == nbins { max } else { min + (i + 1) as f64 * width },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(nbins - 1);
        bins[idx].count += 1;
    }
    bins
}

fn grouped_histogram(
    table: &PassengerTable,
    x_column: &str,
    group_column: &str,
    title: String,
) -> ChartSpec {
    let mut counts: BTreeMap<(CellValue, CellValue), u64> = BTreeMap::new();
    let mut categories: BTreeSet<CellValue> = BTreeSet::new();
    let mut groups: BTreeSet<CellValue> = BTreeSet::new();

    if let (Some(xi), Some(gi)) = (table.column_index(x_column), table.column_index(group_column)) {
        for row in &table.rows {
            let (x, g) = (&row[xi], &row[gi]);
            if x.is_null() || g.is_null() {
                continue;
            }
            categories.insert(x.clone());
            groups.insert(g.clone());
            *counts.entry((g.clone(), x.clone())).or_default() += 1;
        }
    }

    let groups = groups
        .iter()
        .map(|g| BarGroup {
            label: g.to_string(),
            counts: categories
                .iter()
                .map(|x| counts.get(&(g.clone(), x.clone())).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    ChartSpec::GroupedHistogram(GroupedHistogramSpec {
        title,
        x_column: x_column.to_string(),
        group_column: group_column.to_string(),
        categories: categories.iter().map(CellValue::to_string).collect(),
        groups,
        bar_mode: BarMode::Group,
    })
}

fn correlation_heatmap(numeric: &NumericView, title: String) -> ChartSpec {
    let values = numeric
        .values
        .iter()
        .map(|a| numeric.values.iter().map(|b| pearson(a, b)).collect())
        .collect();

    ChartSpec::Heatmap(HeatmapSpec {
        title,
        labels: numeric.columns.clone(),
        values,
        annotate: true,
    })
}

fn scatter_matrix(numeric: &NumericView, title: String) -> ChartSpec {
    let dimensions = numeric
        .columns
        .iter()
        .zip(&numeric.values)
        .filter(|(name, _)| name.as_str() != columns::SURVIVED)
        .map(|(name, values)| Dimension {
            label: name.clone(),
            values: values.clone(),
        })
        .collect();

    ChartSpec::ScatterMatrix(ScatterMatrixSpec {
        title,
        dimensions,
        color_column: columns::SURVIVED.to_string(),
        color: numeric
            .column(columns::SURVIVED)
            .map(<[f64]>::to_vec)
            .unwrap_or_default(),
        color_scale: ColorScale::Viridis,
        marker_size: SCATTER_MARKER_SIZE,
        show_upper_half: false,
        show_scale: false,
        drag_mode: DragMode::Select,
    })
}
