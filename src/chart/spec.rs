use serde::Serialize;

// ---------------------------------------------------------------------------
// ChartSpec – a renderable description of one chart
// ---------------------------------------------------------------------------

/// The declared chart type of a [`ChartSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Histogram,
    GroupedHistogram,
    Heatmap,
    ScatterMatrix,
}

/// One chart: type, data bindings and display options. Serializes to a
/// tagged JSON object for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Histogram(HistogramSpec),
    GroupedHistogram(GroupedHistogramSpec),
    Heatmap(HeatmapSpec),
    ScatterMatrix(ScatterMatrixSpec),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Histogram(_) => ChartKind::Histogram,
            ChartSpec::GroupedHistogram(_) => ChartKind::GroupedHistogram,
            ChartSpec::Heatmap(_) => ChartKind::Heatmap,
            ChartSpec::ScatterMatrix(_) => ChartKind::ScatterMatrix,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Histogram(s) => &s.title,
            ChartSpec::GroupedHistogram(s) => &s.title,
            ChartSpec::Heatmap(s) => &s.title,
            ChartSpec::ScatterMatrix(s) => &s.title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub title: String,
    pub column: String,
    pub nbins: usize,
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Bars of each group side by side within a category.
    Group,
}

/// Counts for one value of the grouping column, aligned with
/// [`GroupedHistogramSpec::categories`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub label: String,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedHistogramSpec {
    pub title: String,
    pub x_column: String,
    pub group_column: String,
    pub categories: Vec<String>,
    pub groups: Vec<BarGroup>,
    pub bar_mode: BarMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSpec {
    pub title: String,
    pub labels: Vec<String>,
    /// Row-major `labels.len()²` matrix; `NaN` (serialized as null) where
    /// a correlation is undefined.
    pub values: Vec<Vec<f64>>,
    /// Write each value inside its cell.
    pub annotate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    Viridis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Dragging draws a selection box instead of panning.
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMatrixSpec {
    pub title: String,
    pub dimensions: Vec<Dimension>,
    pub color_column: String,
    /// Per-point colour value, aligned with every dimension's values.
    pub color: Vec<f64>,
    pub color_scale: ColorScale,
    pub marker_size: f32,
    pub show_upper_half: bool,
    pub show_scale: bool,
    pub drag_mode: DragMode,
}

impl ScatterMatrixSpec {
    pub fn point_count(&self) -> usize {
        self.dimensions.first().map_or(0, |d| d.values.len())
    }
}
