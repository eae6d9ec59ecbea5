use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value as JsonValue;

use super::model::Dataset;
use crate::error::MarkError;

/// Field holding the observation in NOAA "Climate at a Glance" exports.
pub const DEFAULT_FIELD: &str = "value";

// ---------------------------------------------------------------------------
// DataSource – where a series comes from
// ---------------------------------------------------------------------------

/// An ordered series of numeric observations.
pub trait DataSource {
    /// Human-readable origin, used in logs and errors.
    fn name(&self) -> String;

    /// Read every observation in order.
    fn values(&self) -> Result<Vec<f64>>;

    /// Read the series into a [`Dataset`], reporting any failure as
    /// [`MarkError::SourceUnavailable`].
    fn load(&self) -> crate::error::Result<Dataset> {
        let name = self.name();
        let values = self
            .values()
            .map_err(|e| MarkError::SourceUnavailable {
                source_name: name.clone(),
                source: e.into(),
            })?;
        log::info!("Loaded {} values from {name}", values.len());
        Ok(Dataset::from_values(name, values))
    }
}

/// A series already in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    pub name: String,
    pub values: Vec<f64>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        MemorySource {
            name: name.into(),
            values,
        }
    }
}

impl DataSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn values(&self) -> Result<Vec<f64>> {
        Ok(self.values.clone())
    }
}

// ---------------------------------------------------------------------------
// FileSource – dispatch by extension
// ---------------------------------------------------------------------------

/// A series stored in a file.
///
/// Supported formats:
/// * `.xml`     – `<data><value>14.93</value></data>` records (NOAA export)
/// * `.csv`     – optional preamble, then a header row with a `Value` column
/// * `.json`    – `[14.93, ...]`, `[{ "value": 14.93 }, ...]`, or NOAA's
///                `{ "data": { "191712": { "value": "14.93" } } }`
/// * `.parquet` – a numeric column named `value`
///
/// The field/column name can be changed with [`FileSource::with_field`].
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
    pub field: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource {
            path: path.into(),
            field: DEFAULT_FIELD.to_string(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

impl DataSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn values(&self) -> Result<Vec<f64>> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let values = match ext.as_str() {
            "xml" => load_xml(&self.path, &self.field)?,
            "csv" => load_csv(&self.path, &self.field)?,
            "json" => load_json(&self.path, &self.field)?,
            "parquet" | "pq" => load_parquet(&self.path, &self.field)?,
            other => bail!("Unsupported file extension: .{other}"),
        };
        if values.is_empty() {
            bail!("{} contains no '{}' observations", self.path.display(), self.field);
        }
        Ok(values)
    }
}

// -- shared helpers --

fn parse_number(text: &str, record: usize) -> Result<f64> {
    let text = text.trim();
    let value = text
        .parse::<f64>()
        .with_context(|| format!("Record {record}: '{text}' is not a number"))?;
    if !value.is_finite() {
        bail!("Record {record}: '{text}' is not a finite number");
    }
    Ok(value)
}

fn check_missing(value: f64, missing: Option<f64>, record: usize) -> Result<f64> {
    if missing == Some(value) {
        bail!("Record {record}: observation is marked missing ({value})");
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// XML loader
// ---------------------------------------------------------------------------

/// Expected layout:
///
/// ```xml
/// <dataCollection>
///   <description><missing>-99</missing></description>
///   <data><date>191712</date><value>14.93</value></data>
///   ...
/// </dataCollection>
/// ```
fn load_xml(path: &Path, field: &str) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path).context("reading XML file")?;
    parse_xml(&text, field)
}

fn parse_xml(xml: &str, field: &str) -> Result<Vec<f64>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let field = field.as_bytes();
    let mut buf = Vec::new();
    let mut values = Vec::new();
    let mut missing: Option<f64> = None;

    let mut in_record = false;
    let mut in_field = false;
    let mut in_missing = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf).context("parsing XML")? {
            Event::Start(e) => match e.name().as_ref() {
                b"data" => in_record = true,
                b"missing" if !in_record => {
                    in_missing = true;
                    text.clear();
                }
                name if in_record && name == field => {
                    in_field = true;
                    text.clear();
                }
                _ => {}
            },
            Event::Text(t) if in_field || in_missing => {
                text.push_str(&t.unescape().context("unescaping XML text")?);
            }
            Event::Empty(e) if in_record && e.name().as_ref() == field => {
                bail!("Record {}: empty value element", values.len());
            }
            Event::End(e) => match e.name().as_ref() {
                b"data" => in_record = false,
                b"missing" if in_missing => {
                    in_missing = false;
                    missing = Some(parse_number(&text, 0).context("reading missing-value marker")?);
                }
                name if in_field && name == field => {
                    in_field = false;
                    let record = values.len();
                    let value = parse_number(&text, record)?;
                    values.push(check_missing(value, missing, record)?);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(values)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// NOAA CSV layout: free-form preamble lines, then a header row, then data:
///
/// ```text
/// Colorado, Precipitation, January-December
/// Missing: -99
/// Date,Value,Anomaly
/// 191712,14.93,-2.36
/// ```
///
/// A plain CSV whose first row is the header works the same way.
fn load_csv(path: &Path, field: &str) -> Result<Vec<f64>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    parse_csv(reader, field)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>, field: &str) -> Result<Vec<f64>> {
    let mut column: Option<usize> = None;
    let mut missing: Option<f64> = None;
    let mut values = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let Some(idx) = column else {
            if let Some(marker) = record.get(0).and_then(|f| f.trim().strip_prefix("Missing:")) {
                missing = Some(parse_number(marker, row_no).context("reading missing-value marker")?);
            }
            column = record
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(field));
            continue;
        };

        let cell = record
            .get(idx)
            .with_context(|| format!("CSV row {row_no}: missing '{field}' column"))?;
        let value = parse_number(cell, values.len())?;
        values.push(check_missing(value, missing, values.len())?);
    }

    if column.is_none() {
        bail!("CSV has no '{field}' header");
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Accepted shapes:
///
/// ```json
/// [14.93, 17.20]
/// [{ "value": 14.93 }, { "value": 17.20 }]
/// { "description": { "missing": -99 },
///   "data": { "191712": { "value": "14.93" }, "191812": { "value": "17.20" } } }
/// ```
///
/// Keyed `data` objects are read in key order, which is date order for NOAA
/// `YYYYMM` keys.
fn load_json(path: &Path, field: &str) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    parse_json(&root, field)
}

fn parse_json(root: &JsonValue, field: &str) -> Result<Vec<f64>> {
    let mut missing = None;

    let records: Vec<&JsonValue> = match root {
        JsonValue::Array(items) => items.iter().collect(),
        JsonValue::Object(obj) => {
            if let Some(marker) = obj.get("description").and_then(|d| d.get("missing")) {
                missing = Some(json_number(marker, 0).context("reading missing-value marker")?);
            }
            match obj.get("data") {
                Some(JsonValue::Array(items)) => items.iter().collect(),
                Some(JsonValue::Object(keyed)) => {
                    let mut entries: Vec<(&String, &JsonValue)> = keyed.iter().collect();
                    entries.sort_by(|a, b| a.0.cmp(b.0));
                    entries.into_iter().map(|(_, v)| v).collect()
                }
                _ => bail!("Expected a 'data' array or object"),
            }
        }
        _ => bail!("Expected top-level JSON array or object"),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            let raw = match rec {
                JsonValue::Object(obj) => obj
                    .get(field)
                    .with_context(|| format!("Record {i}: missing '{field}'"))?,
                other => other,
            };
            check_missing(json_number(raw, i)?, missing, i)
        })
        .collect()
}

fn json_number(val: &JsonValue, record: usize) -> Result<f64> {
    match val {
        JsonValue::Number(n) => n
            .as_f64()
            .with_context(|| format!("Record {record}: {n} is not representable")),
        JsonValue::String(s) => parse_number(s, record),
        other => bail!("Record {record}: expected a number, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read one numeric column across all record batches.
///
/// Works with files written by Pandas (`df.to_parquet()`), Polars, and the
/// `generate_sample` binary.
fn load_parquet(path: &Path, field: &str) -> Result<Vec<f64>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut values = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let idx = batch
            .schema()
            .index_of(field)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{field}' column"))?;
        values.extend(numeric_column(batch.column(idx), field)?);
    }
    Ok(values)
}

fn numeric_column(col: &ArrayRef, field: &str) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        bail!("Column '{field}' contains {} null values", col.null_count());
    }

    let values: Vec<f64> = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .values()
            .iter()
            .copied()
            .collect(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        other => bail!("Column '{field}' has type {other:?}, expected a numeric type"),
    };
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        bail!("Column '{field}' row {i}: {} is not a finite number", values[i]);
    }
    Ok(values)
}
