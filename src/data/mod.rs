//! Data layer: core types, loading, projection and aggregates.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → PassengerTable, validate schema
//!   └──────────┘
//!        │
//!        ├──────────────────────┐
//!        ▼                      ▼
//!   ┌────────────┐        ┌──────────┐
//!   │ projection  │        │  stats    │  count / survived / fare / age
//!   └────────────┘        └──────────┘
//!   numeric columns,
//!   complete records only
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod projection;
pub mod stats;

use std::path::Path;

use anyhow::Result;

use model::PassengerTable;
use projection::NumericView;
use stats::Statistics;

/// Everything derived from one loaded file. Built once, read-only after.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: PassengerTable,
    pub numeric: NumericView,
    pub stats: Statistics,
}

impl Dataset {
    pub fn from_table(table: PassengerTable) -> Self {
        let numeric = NumericView::from_table(&table);
        let stats = Statistics::compute(&table);
        Dataset {
            table,
            numeric,
            stats,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let table = loader::load_file(path)?;
        Ok(Self::from_table(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loaded_file_statistics_match_its_rows() {
        let body = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
                    1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n\
                    2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.28,C85,C\n\
                    3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,STON/O2. 3101282,8.05,,S\n\
                    4,1,1,\"Futrelle, Mrs. Jacques Heath\",female,35,1,0,113803,53.1,C123,S\n";
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        let data_lines = body.lines().count() - 1;

        assert_eq!(dataset.stats.total_passengers, data_lines);
        assert_eq!(dataset.stats.survived, 3);
        assert_eq!(dataset.stats.total_fare_text(), "139.68");
        assert_eq!(dataset.stats.average_age_text(), "31.67");
        assert_eq!(dataset.numeric.len(), 3);
    }

    #[test]
    fn header_only_file_loads_empty() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "PassengerId,Survived,Pclass,Sex,Age,SibSp,Parch,Fare").unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert!(dataset.table.is_empty());
        assert!(dataset.numeric.is_empty());
        assert_eq!(dataset.stats.total_passengers, 0);
    }
}
