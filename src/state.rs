use std::path::{Path, PathBuf};

use crate::chart::selection::{ScatterSelection, SelectionEvent};
use crate::chart::{build_chart, AnalysisMode, ChartSpec};
use crate::config::DashboardConfig;
use crate::data::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset; read-only until another file is opened.
    pub dataset: Dataset,

    /// Path the dataset was read from.
    pub data_path: PathBuf,

    /// Analysis chosen in the sidebar.
    mode: AnalysisMode,

    /// Chart for `mode`, rebuilt only when the mode or dataset changes.
    chart: ChartSpec,

    /// Box selection on the scatter matrix.
    pub selection: ScatterSelection,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a missing background image has already been reported.
    pub background_warned: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Self {
        let mode = AnalysisMode::default();
        let chart = build_chart(&dataset.table, &dataset.numeric, mode);
        Self {
            data_path: config.data_path.clone(),
            config,
            dataset,
            mode,
            chart,
            selection: ScatterSelection::default(),
            status_message: None,
            background_warned: false,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    /// Switch analysis; the chart is rebuilt only on an actual change.
    pub fn select_mode(&mut self, mode: AnalysisMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("Analysis changed: {} -> {}", self.mode, mode);
        self.mode = mode;
        self.selection.clear();
        self.rebuild_chart();
    }

    /// Ingest a newly loaded dataset, keeping the current analysis.
    pub fn set_dataset(&mut self, dataset: Dataset, path: &Path) {
        self.dataset = dataset;
        self.data_path = path.to_path_buf();
        self.selection.clear();
        self.status_message = None;
        self.rebuild_chart();
    }

    /// Feed pointer input from the scatter matrix into the selection.
    pub fn apply_selection(&mut self, event: SelectionEvent) {
        if let ChartSpec::ScatterMatrix(spec) = &self.chart {
            self.selection.apply(event, spec);
        }
    }

    fn rebuild_chart(&mut self) {
        self.chart = build_chart(&self.dataset.table, &self.dataset.numeric, self.mode);
        log::debug!("Built {:?} chart '{}'", self.chart.kind(), self.chart.title());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::ChartKind;
    use crate::data::model::{CellValue::*, PassengerTable};

    fn dataset(fares: &[f64]) -> Dataset {
        let rows = fares
            .iter()
            .enumerate()
            .map(|(i, f)| {
                vec![
                    Integer((i % 2) as i64),
                    Integer(3),
                    String("male".into()),
                    Integer(20 + i as i64),
                    Float(*f),
                ]
            })
            .collect();
        Dataset::from_table(PassengerTable::from_rows(
            vec!["Survived".into(), "Pclass".into(), "Sex".into(), "Age".into(), "Fare".into()],
            rows,
        ))
    }

    #[test]
    fn starts_on_age_distribution() {
        let state = AppState::new(DashboardConfig::default(), dataset(&[7.25, 8.05]));
        assert_eq!(state.mode(), AnalysisMode::AgeDistribution);
        assert_eq!(state.chart().kind(), ChartKind::Histogram);
        assert_eq!(state.chart().title(), "Distribution of Passenger Ages");
    }

    #[test]
    fn selecting_mode_rebuilds_chart_and_clears_selection() {
        let mut state = AppState::new(DashboardConfig::default(), dataset(&[7.25, 8.05]));
        state.select_mode(AnalysisMode::ScatterMatrix);
        state.selection.begin((0, 0), [0.0, 0.0]);

        state.select_mode(AnalysisMode::CorrelationHeatmap);
        assert_eq!(state.chart().kind(), ChartKind::Heatmap);
        assert!(!state.selection.is_dragging());
    }

    #[test]
    fn selection_events_ignored_outside_scatter_matrix() {
        let mut state = AppState::new(DashboardConfig::default(), dataset(&[7.25, 8.05]));
        state.apply_selection(SelectionEvent::Begin((0, 0), [0.0, 0.0]));
        assert!(!state.selection.is_dragging());

        state.select_mode(AnalysisMode::ScatterMatrix);
        state.apply_selection(SelectionEvent::Begin((0, 0), [0.0, 0.0]));
        assert!(state.selection.is_dragging());
    }

    #[test]
    fn new_dataset_keeps_mode() {
        let mut state = AppState::new(DashboardConfig::default(), dataset(&[7.25]));
        state.select_mode(AnalysisMode::FareDistribution);
        state.status_message = Some("Error: old".into());

        state.set_dataset(dataset(&[1.0, 2.0, 3.0]), Path::new("other.csv"));
        assert_eq!(state.mode(), AnalysisMode::FareDistribution);
        assert_eq!(state.dataset.stats.total_passengers, 3);
        assert_eq!(state.data_path, PathBuf::from("other.csv"));
        assert!(state.status_message.is_none());
        let ChartSpec::Histogram(h) = state.chart() else {
            panic!("expected histogram");
        };
        assert_eq!(h.bins.iter().map(|b| b.count).sum::<u64>(), 3);
    }
}
