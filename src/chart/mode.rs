use std::fmt;

use serde::Serialize;

/// Which analysis the sidebar currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AnalysisMode {
    #[default]
    AgeDistribution,
    FareDistribution,
    SurvivalByClass,
    SurvivalByGender,
    CorrelationHeatmap,
    ScatterMatrix,
}

impl AnalysisMode {
    /// Sidebar order.
    pub const ALL: [AnalysisMode; 6] = [
        AnalysisMode::AgeDistribution,
        AnalysisMode::FareDistribution,
        AnalysisMode::SurvivalByClass,
        AnalysisMode::SurvivalByGender,
        AnalysisMode::CorrelationHeatmap,
        AnalysisMode::ScatterMatrix,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::AgeDistribution => "Age Distribution",
            AnalysisMode::FareDistribution => "Fare Distribution",
            AnalysisMode::SurvivalByClass => "Survival by Class",
            AnalysisMode::SurvivalByGender => "Survival by Gender",
            AnalysisMode::CorrelationHeatmap => "Correlation Heatmap",
            AnalysisMode::ScatterMatrix => "Scatter Matrix",
        }
    }

    /// Title drawn above the chart.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisMode::AgeDistribution => "Distribution of Passenger Ages",
            AnalysisMode::FareDistribution => "Distribution of Passenger Fares",
            AnalysisMode::SurvivalByClass => "Survival Rates by Passenger Class",
            AnalysisMode::SurvivalByGender => "Survival Rates by Gender",
            AnalysisMode::CorrelationHeatmap => "Correlation Heatmap",
            AnalysisMode::ScatterMatrix => "Scatter Matrix of Selected Features",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_option_is_default() {
        assert_eq!(AnalysisMode::default(), AnalysisMode::ALL[0]);
        assert_eq!(AnalysisMode::default().label(), "Age Distribution");
    }

    #[test]
    fn labels_are_unique() {
        let labels: std::collections::BTreeSet<_> =
            AnalysisMode::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), AnalysisMode::ALL.len());
    }
}
