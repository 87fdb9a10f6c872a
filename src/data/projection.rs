use serde::Serialize;

use super::model::PassengerTable;

// ---------------------------------------------------------------------------
// NumericView – numeric-only, complete-case projection of the table
// ---------------------------------------------------------------------------

/// Numeric columns of a [`PassengerTable`] with every incomplete record
/// removed. Values are stored column-major; all columns share one length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericView {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
    /// Index into the source table of each kept record.
    pub source_rows: Vec<usize>,
}

impl NumericView {
    /// Keep the uniformly numeric columns, then drop any record missing a
    /// value in one of them.
    pub fn from_table(table: &PassengerTable) -> Self {
        let kept: Vec<(usize, String)> = table
            .column_names
            .iter()
            .enumerate()
            .filter(|(_, name)| table.is_numeric_column(name))
            .map(|(i, name)| (i, name.clone()))
            .collect();

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); kept.len()];
        let mut source_rows = Vec::new();

        for (row_idx, row) in table.rows.iter().enumerate() {
            let record: Option<Vec<f64>> = kept.iter().map(|(i, _)| row[*i].as_f64()).collect();
            let Some(record) = record else {
                continue;
            };
            for (col, v) in values.iter_mut().zip(record) {
                col.push(v);
            }
            source_rows.push(row_idx);
        }

        NumericView {
            columns: kept.into_iter().map(|(_, name)| name).collect(),
            values,
            source_rows,
        }
    }

    /// Number of complete records.
    pub fn len(&self) -> usize {
        self.source_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(&self.values[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(rows: Vec<Vec<CellValue>>) -> PassengerTable {
        PassengerTable::from_rows(
            vec!["Survived".into(), "Sex".into(), "Age".into(), "Fare".into(), "Cabin".into()],
            rows,
        )
    }

    #[test]
    fn drops_incomplete_records_and_text_columns() {
        use CellValue::*;
        let t = table(vec![
            vec![Integer(0), String("male".into()), Integer(22), Float(7.25), Null],
            vec![Integer(1), String("female".into()), Null, Float(71.28), String("C85".into())],
            vec![Integer(1), String("female".into()), Integer(38), Float(8.05), Null],
        ]);
        let view = NumericView::from_table(&t);

        assert_eq!(view.columns, vec!["Survived", "Age", "Fare"]);
        assert_eq!(view.len(), 2);
        assert_eq!(view.source_rows, vec![0, 2]);
        assert_eq!(view.column("Age").unwrap(), &[22.0, 38.0]);
        assert_eq!(view.column("Fare").unwrap(), &[7.25, 8.05]);
    }

    #[test]
    fn never_contains_missing_values() {
        use CellValue::*;
        let t = table(vec![
            vec![Null, String("male".into()), Null, Null, Null],
            vec![Integer(1), Null, Float(3.5), Integer(10), Null],
            vec![Integer(0), String("male".into()), Integer(40), Null, Null],
        ]);
        let view = NumericView::from_table(&t);
        assert_eq!(view.len(), 1);
        for col in &view.values {
            assert_eq!(col.len(), view.len());
            assert!(col.iter().all(|v| !v.is_nan()));
        }
    }

    #[test]
    fn deterministic() {
        use CellValue::*;
        let t = table(vec![vec![Integer(1), Null, Float(3.5), Integer(10), Null]]);
        assert_eq!(NumericView::from_table(&t), NumericView::from_table(&t));
    }
}
