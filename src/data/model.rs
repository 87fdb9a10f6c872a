use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Column names of the Kaggle `train.csv` layout that the dashboard binds to.
pub mod columns {
    pub const CLASS: &str = "Pclass";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const FARE: &str = "Fare";
    pub const SURVIVED: &str = "Survived";

    /// Every header a passenger file must carry.
    pub const REQUIRED: [&str; 5] = [CLASS, SEX, AGE, FARE, SURVIVED];

    /// Columns whose non-null cells must be numeric.
    pub const NUMERIC: [&str; 4] = [CLASS, AGE, FARE, SURVIVED];
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the passenger table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV column can infer to.
/// Grouping uses `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            // Mixed int/float columns sort numerically, ints first on ties.
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Parse a raw text cell, guessing the narrowest type.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_nan() {
                return CellValue::Null;
            }
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Numeric interpretation; booleans are not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// PassengerTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table: one row per passenger, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerTable {
    /// Column names in header order.
    pub column_names: Vec<String>,
    /// Row-major cells; every row has `column_names.len()` entries.
    pub rows: Vec<Vec<CellValue>>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl PassengerTable {
    /// Build the column index from header-ordered rows. Short rows are
    /// padded with `Null`; a column holding both integers and floats is
    /// promoted to floats so `1` and `1.0` are one value.
    pub fn from_rows(column_names: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = column_names.len();
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }

        for c in 0..width {
            let has_int = rows.iter().any(|r| matches!(r[c], CellValue::Integer(_)));
            let has_float = rows.iter().any(|r| matches!(r[c], CellValue::Float(_)));
            if !(has_int && has_float) {
                continue;
            }
            for row in &mut rows {
                if let CellValue::Integer(i) = row[c] {
                    row[c] = CellValue::Float(i as f64);
                }
            }
        }

        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = column_names
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for row in &rows {
            for (col, val) in column_names.iter().zip(row.iter()) {
                if let Some(set) = unique_values.get_mut(col) {
                    set.insert(val.clone());
                }
            }
        }

        PassengerTable {
            column_names,
            rows,
            unique_values,
        }
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, or `None` if it does not exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Non-null numeric values of a column; missing cells are skipped.
    pub fn numeric_values(&self, name: &str) -> Vec<f64> {
        self.column(name)
            .map(|cells| cells.filter_map(CellValue::as_f64).collect())
            .unwrap_or_default()
    }

    /// A column is numeric when it has at least one value and every
    /// non-null cell is an integer or float.
    pub fn is_numeric_column(&self, name: &str) -> bool {
        self.unique_values.get(name).is_some_and(|vals| {
            vals.iter().any(CellValue::is_numeric)
                && vals.iter().all(|v| v.is_null() || v.is_numeric())
        })
    }
}
