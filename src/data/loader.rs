use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Dataset, LaunchRecord, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four launch columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV headers
///
/// Extra columns (flight number, booster version, pandas index) are ignored.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// A row as it appears in CSV and JSON input, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        to_record(
            self.site,
            self.payload_mass_kg,
            self.class,
            self.booster_version_category,
            row,
        )
    }
}

fn to_record(
    site: String,
    payload_mass_kg: f64,
    class: i64,
    booster_version_category: String,
    row: usize,
) -> Result<LaunchRecord> {
    let outcome = Outcome::from_class(class)
        .with_context(|| format!("Row {row}: '{CLASS_COLUMN}' must be 0 or 1, got {class}"))?;
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        bail!("Row {row}: '{PAYLOAD_COLUMN}' must be a non-negative number, got {payload_mass_kg}");
    }
    Ok(LaunchRecord {
        site,
        payload_mass_kg,
        outcome,
        booster_version_category,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_CATEGORY_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Dataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON")?;
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_record(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64, Int32, Float64 or Boolean
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut records)?;
    }

    Ok(Dataset::from_records(records))
}

fn read_batch(batch: &RecordBatch, records: &mut Vec<LaunchRecord>) -> Result<()> {
    let site_col = column(batch, SITE_COLUMN)?;
    let payload_col = column(batch, PAYLOAD_COLUMN)?;
    let class_col = column(batch, CLASS_COLUMN)?;
    let booster_col = column(batch, BOOSTER_CATEGORY_COLUMN)?;

    let offset = records.len();
    for row in 0..batch.num_rows() {
        let global_row = offset + row;
        let site = extract_string(site_col, row)
            .with_context(|| format!("Row {global_row}: failed to read '{SITE_COLUMN}'"))?;
        let payload = extract_f64(payload_col, row)
            .with_context(|| format!("Row {global_row}: failed to read '{PAYLOAD_COLUMN}'"))?;
        let class = extract_class(class_col, row)
            .with_context(|| format!("Row {global_row}: failed to read '{CLASS_COLUMN}'"))?;
        let booster = extract_string(booster_col, row).with_context(|| {
            format!("Row {global_row}: failed to read '{BOOSTER_CATEGORY_COLUMN}'")
        })?;

        records.push(to_record(site, payload, class, booster, global_row)?);
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .context("expected LargeStringArray")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("Expected numeric column, got {other:?}"),
    };
    value.context("column array type does not match its schema")
}

fn extract_class(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as i64),
        DataType::Boolean => any.downcast_ref::<BooleanArray>().map(|a| a.value(row) as i64),
        DataType::Float64 => {
            let v = any
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?
                .value(row);
            if v.fract() != 0.0 {
                bail!("class {v} is not an integer");
            }
            Some(v as i64)
        }
        other => bail!("Expected integer column, got {other:?}"),
    };
    value.context("column array type does not match its schema")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
3,4,KSC LC-39A,1,2490.0,F9 B4 B1041.1,B4
";

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_ignores_extra_columns() {
        let file = write_temp(".csv", SAMPLE_CSV.as_bytes());
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites().len(), 3);
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));
        let first = &ds.records()[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.booster_version_category, "v1.0");
        assert_eq!(ds.records()[2].outcome, Outcome::Success);
    }

    #[test]
    fn test_csv_missing_column() {
        let input = "Launch Site,class,Booster Version Category\nKSC LC-39A,1,FT\n";
        let err = read_csv(csv::Reader::from_reader(input.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn test_csv_rejects_bad_class() {
        let input = "Launch Site,Payload Mass (kg),class,Booster Version Category\nKSC,100,2,FT\n";
        let err = read_csv(csv::Reader::from_reader(input.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("must be 0 or 1"));
    }

    #[test]
    fn test_csv_rejects_non_numeric_payload() {
        let input = "Launch Site,Payload Mass (kg),class,Booster Version Category\nKSC,heavy,1,FT\n";
        assert!(read_csv(csv::Reader::from_reader(input.as_bytes())).is_err());
    }

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 3000, "class": 1,
             "Booster Version Category": "FT", "Flight Number": 7},
            {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 500.5, "class": 0,
             "Booster Version Category": "v1.1"}
        ]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].payload_mass_kg, 3000.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
            Field::new(CLASS_COLUMN, DataType::Int64, false),
            Field::new(BOOSTER_CATEGORY_COLUMN, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
                Arc::new(Float64Array::from(vec![2490.0, 9600.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["B4", "FT"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].site, "VAFB SLC-4E");
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.payload_bounds(), Some((2490.0, 9600.0)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", b"");
        assert!(load_file(file.path()).is_err());
    }
}
