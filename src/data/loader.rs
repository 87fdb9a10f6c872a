use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DatasetError;
use super::model::{columns, CellValue, PassengerTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a passenger table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one passenger per line (Kaggle `train.csv`)
/// * `.json`    – `[{ "Survived": 0, "Pclass": 3, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// The result is validated against the required schema before it is
/// returned; see [`validate_schema`].
pub fn load_file(path: &Path) -> Result<PassengerTable> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()).into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    };

    validate_schema(&table)?;
    Ok(table)
}

/// Check the headers and the types of the columns the dashboard binds to.
pub fn validate_schema(table: &PassengerTable) -> Result<(), DatasetError> {
    let missing: Vec<String> = columns::REQUIRED
        .iter()
        .filter(|c| table.column_index(c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    for col in columns::NUMERIC {
        let Some(cells) = table.column(col) else {
            continue;
        };
        for (row, cell) in cells.enumerate() {
            if !cell.is_null() && !cell.is_numeric() {
                return Err(DatasetError::NonNumericColumn {
                    column: col.to_string(),
                    record: row + 1,
                    value: cell.to_string(),
                });
            }
        }
    }

    if let Some(cells) = table.column(columns::SURVIVED) {
        for (row, cell) in cells.enumerate() {
            let ok = match cell {
                CellValue::Null => true,
                CellValue::Integer(i) => *i == 0 || *i == 1,
                CellValue::Float(f) => *f == 0.0 || *f == 1.0,
                _ => false,
            };
            if !ok {
                return Err(DatasetError::InvalidSurvivedFlag {
                    record: row + 1,
                    value: cell.to_string(),
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PassengerTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    Ok(PassengerTable::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Column order follows the first record; keys that only appear later are
/// appended.
fn load_json(path: &Path) -> Result<PassengerTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(PassengerTable::from_rows(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::parse(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<PassengerTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .enumerate()
                .map(|(c, col)| {
                    extract_cell(col, row)
                        .with_context(|| format!("Row {row}: failed to read '{}'", headers[c]))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }

    Ok(PassengerTable::from_rows(headers, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };

    match value {
        Some(CellValue::Float(f)) if f.is_nan() => Ok(CellValue::Null),
        Some(v) => Ok(v),
        // Other physical types (dictionary, small ints, views) go through
        // their display form and are re-typed like a text cell.
        None => {
            let text = array_value_to_string(col, row).context("formatting arrow value")?;
            Ok(CellValue::parse(&text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

    fn write_temp(ext: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_kaggle_csv() {
        let body = format!(
            "{HEADER}\n\
             1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n\
             2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C\n\
             6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q\n"
        );
        let file = write_temp("csv", &body);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names.len(), 12);
        let names: Vec<_> = table.column("Name").unwrap().cloned().collect();
        assert_eq!(names[0], CellValue::String("Braund, Mr. Owen Harris".into()));
        let ages: Vec<_> = table.column("Age").unwrap().cloned().collect();
        assert_eq!(ages[2], CellValue::Null);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("/definitely/not/here/train.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::NotFound(_))
        ));
    }

    #[test]
    fn missing_columns_are_reported() {
        let file = write_temp("csv", "Survived,Pclass,Name\n1,1,x\n");
        let err = load_file(file.path()).unwrap_err();
        match err.downcast_ref::<DatasetError>() {
            Some(DatasetError::MissingColumns(cols)) => {
                assert_eq!(cols, &vec!["Sex".to_string(), "Age".into(), "Fare".into()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn survived_flag_must_be_binary() {
        let file = write_temp("csv", "Survived,Pclass,Sex,Age,Fare\n2,1,male,30,10\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidSurvivedFlag { record: 1, .. })
        ));
    }

    #[test]
    fn text_in_numeric_column_is_rejected() {
        let file = write_temp("csv", "Survived,Pclass,Sex,Age,Fare\n1,1,male,old,10\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::NonNumericColumn { column, record: 1, .. }) if column == "Age"
        ));
        assert!(err.to_string().starts_with("record 1:"));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp("xlsx", "irrelevant");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_records() {
        let body = r#"[
            {"Survived": 1, "Pclass": 1, "Sex": "female", "Age": 38.0, "Fare": 71.2833},
            {"Survived": 0, "Pclass": 3, "Sex": "male", "Age": null, "Fare": 8.05}
        ]"#;
        let file = write_temp("json", body);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.numeric_values("Age"), vec![38.0]);
        assert_eq!(table.numeric_values("Survived"), vec![1.0, 0.0]);
    }

    #[test]
    fn json_mixed_int_float_flags_collapse() {
        let body = r#"[
            {"Survived": 1, "Pclass": 3, "Sex": "male", "Age": 30, "Fare": 8.05},
            {"Survived": 1.0, "Pclass": 3.0, "Sex": "female", "Age": 28, "Fare": 7.9}
        ]"#;
        let file = write_temp("json", body);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.unique_values["Survived"].len(), 1);
        assert_eq!(table.unique_values["Pclass"].len(), 1);
    }

    #[test]
    fn loads_parquet() {
        use arrow::array::{ArrayRef, UInt8Array};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Survived", DataType::Int64, true),
            Field::new("Pclass", DataType::Int32, true),
            Field::new("Sex", DataType::LargeUtf8, true),
            Field::new("Age", DataType::Float64, true),
            Field::new("Fare", DataType::Float32, true),
            Field::new("SibSp", DataType::UInt8, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![0, 1, 1])),
            Arc::new(Int32Array::from(vec![3, 1, 2])),
            Arc::new(LargeStringArray::from(vec!["male", "female", "female"])),
            Arc::new(Float64Array::from(vec![Some(22.0), None, Some(f64::NAN)])),
            Arc::new(Float32Array::from(vec![7.25, 71.5, 13.0])),
            Arc::new(UInt8Array::from(vec![1, 0, 2])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column_names,
            vec!["Survived", "Pclass", "Sex", "Age", "Fare", "SibSp"]
        );
        assert_eq!(
            table.rows[0],
            vec![
                CellValue::Integer(0),
                CellValue::Integer(3),
                CellValue::String("male".into()),
                CellValue::Float(22.0),
                CellValue::Float(7.25),
                CellValue::Integer(1),
            ]
        );
        // Missing and NaN ages both read as missing.
        assert_eq!(table.rows[1][3], CellValue::Null);
        assert_eq!(table.rows[2][3], CellValue::Null);
        assert_eq!(table.numeric_values("SibSp"), vec![1.0, 0.0, 2.0]);
    }
}
