use super::model::{columns, PassengerTable};

// ---------------------------------------------------------------------------
// Key statistics shown above the chart
// ---------------------------------------------------------------------------

/// The four headline aggregates. Missing cells are skipped: they count
/// towards neither sums nor the mean's denominator.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_passengers: usize,
    pub survived: u64,
    pub total_fare: f64,
    /// `None` when the table has no age values at all.
    pub average_age: Option<f64>,
}

impl Statistics {
    pub fn compute(table: &PassengerTable) -> Self {
        let survived = table
            .numeric_values(columns::SURVIVED)
            .iter()
            .sum::<f64>()
            .round() as u64;

        Statistics {
            total_passengers: table.len(),
            survived,
            total_fare: table.numeric_values(columns::FARE).iter().sum(),
            average_age: mean(&table.numeric_values(columns::AGE)),
        }
    }

    pub fn total_fare_text(&self) -> String {
        format!("{:.2}", self.total_fare)
    }

    pub fn average_age_text(&self) -> String {
        match self.average_age {
            Some(age) => format!("{age:.2}"),
            None => "n/a".to_string(),
        }
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson correlation of two equally long series. `NaN` when either side
/// has zero variance or fewer than two points.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = xs.iter().sum::<f64>() / n as f64;
    let my = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }
    (cov / (vx.sqrt() * vy.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue::{self, *};
    use crate::data::projection::NumericView;

    fn titanic(rows: Vec<Vec<CellValue>>) -> PassengerTable {
        PassengerTable::from_rows(
            vec!["Survived".into(), "Pclass".into(), "Sex".into(), "Age".into(), "Fare".into()],
            rows,
        )
    }

    fn scenario() -> PassengerTable {
        titanic(vec![
            vec![Integer(0), Integer(3), String("male".into()), Integer(22), Float(7.25)],
            vec![Integer(1), Integer(1), String("female".into()), Null, Float(71.28)],
            vec![Integer(1), Integer(3), String("female".into()), Integer(38), Float(8.05)],
        ])
    }

    #[test]
    fn three_record_scenario() {
        let table = scenario();
        let stats = Statistics::compute(&table);

        assert_eq!(stats.total_passengers, 3);
        assert_eq!(stats.survived, 2);
        assert_eq!(stats.average_age_text(), "30.00");
        assert_eq!(stats.total_fare_text(), "86.58");

        let view = NumericView::from_table(&table);
        assert!(view.columns.iter().any(|c| c == "Age"));
        assert_eq!(view.source_rows, vec![0, 2]);
    }

    #[test]
    fn survived_within_bounds() {
        let table = scenario();
        let stats = Statistics::compute(&table);
        assert!(stats.survived <= stats.total_passengers as u64);
    }

    #[test]
    fn no_ages_reports_na() {
        let table = titanic(vec![vec![Integer(0), Integer(3), Null, Null, Null]]);
        let stats = Statistics::compute(&table);
        assert_eq!(stats.average_age, None);
        assert_eq!(stats.average_age_text(), "n/a");
        assert_eq!(stats.total_fare_text(), "0.00");
    }

    #[test]
    fn pearson_values() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&xs, &[5.0, 5.0, 5.0, 5.0]).is_nan());
        assert!(pearson(&[1.0], &[1.0]).is_nan());
    }
}
