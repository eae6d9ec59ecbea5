//! File-backed data sources.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Float32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use climate_grid::{DataSource, FileSource, MarkError, MarkPipeline, PosterConfig};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn noaa_xml(values: &[f64]) -> String {
    let mut xml = String::from("<dataCollection><description><missing>-99</missing></description>");
    for (i, v) in values.iter().enumerate() {
        xml.push_str(&format!("<data><date>{}12</date><value>{v}</value></data>", 1917 + i));
    }
    xml.push_str("</dataCollection>");
    xml
}

// ============================================================================
// Formats
// ============================================================================

#[test]
fn test_xml_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "precipitation.xml", &noaa_xml(&[14.93, 11.85, 25.52]));

    let ds = FileSource::new(&path).load().unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.values().collect::<Vec<_>>(), vec![14.93, 11.85, 25.52]);
    assert_eq!(ds.name, path.display().to_string());
}

#[test]
fn test_csv_file_with_noaa_preamble() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "temperature.csv",
        "Colorado, Average Temperature, January-December\n\
         Units: Degrees Fahrenheit\n\
         Base Period: 1901-2000\n\
         Missing: -99\n\
         Date,Value,Anomaly\n\
         191712,43.10,-1.20\n\
         191812,44.70,0.40\n",
    );

    let ds = FileSource::new(&path).load().unwrap();
    assert_eq!(ds.values().collect::<Vec<_>>(), vec![43.1, 44.7]);

    let anomalies = FileSource::new(&path).with_field("Anomaly").load().unwrap();
    assert_eq!(anomalies.values().collect::<Vec<_>>(), vec![-1.2, 0.4]);
}

#[test]
fn test_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "precipitation.json",
        r#"{"description": {"missing": -99},
            "data": {"191912": {"value": "25.52"}, "191712": {"value": "14.93"}}}"#,
    );
    let ds = FileSource::new(&path).load().unwrap();
    assert_eq!(ds.values().collect::<Vec<_>>(), vec![14.93, 25.52]);
}

#[test]
fn test_parquet_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("climate.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("precipitation", DataType::Float64, false),
        Field::new("temperature", DataType::Float32, false),
        Field::new("station", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![1917, 1918])),
            Arc::new(Float64Array::from(vec![14.93, 11.85])),
            Arc::new(Float32Array::from(vec![43.5f32, 44.25])),
            Arc::new(StringArray::from(vec!["CO", "CO"])),
        ],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let precip = FileSource::new(&path).with_field("precipitation").load().unwrap();
    assert_eq!(precip.values().collect::<Vec<_>>(), vec![14.93, 11.85]);

    let temp = FileSource::new(&path).with_field("temperature").load().unwrap();
    assert_eq!(temp.values().collect::<Vec<_>>(), vec![43.5, 44.25]);

    let years = FileSource::new(&path).with_field("year").load().unwrap();
    assert_eq!(years.values().collect::<Vec<_>>(), vec![1917.0, 1918.0]);

    assert!(FileSource::new(&path).with_field("station").load().is_err());
    assert!(FileSource::new(&path).load().is_err());
}

// ============================================================================
// Failures surface as SourceUnavailable
// ============================================================================

#[test]
fn test_missing_file_is_source_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = FileSource::new(dir.path().join("nope.xml")).load().unwrap_err();
    assert!(matches!(err, MarkError::SourceUnavailable { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_missing_marker_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "precipitation.xml", &noaa_xml(&[14.93, -99.0]));
    assert!(matches!(
        FileSource::new(&path).load(),
        Err(MarkError::SourceUnavailable { .. })
    ));
}

#[test]
fn test_non_finite_values_are_source_unavailable() {
    let dir = TempDir::new().unwrap();
    let xml = write(
        &dir,
        "precipitation.xml",
        "<dataCollection><data><value>NaN</value></data><data><value>inf</value></data></dataCollection>",
    );
    assert!(matches!(
        FileSource::new(&xml).load(),
        Err(MarkError::SourceUnavailable { .. })
    ));

    let csv = write(&dir, "temperature.csv", "Date,Value\n191712,infinity\n");
    assert!(matches!(
        FileSource::new(&csv).load(),
        Err(MarkError::SourceUnavailable { .. })
    ));
}

#[test]
fn test_file_without_records_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "empty.xml", "<dataCollection></dataCollection>");
    assert!(FileSource::new(&path).load().is_err());
}

// ============================================================================
// Files → marks
// ============================================================================

#[test]
fn test_full_poster_from_xml_files() {
    let dir = TempDir::new().unwrap();
    let precip: Vec<f64> = (0..100).map(|i| 11.85 + 0.1 * i as f64).collect();
    let temp: Vec<f64> = (0..100).map(|i| 42.5 + 0.05 * i as f64).collect();
    let precip_path = write(&dir, "precipitation.xml", &noaa_xml(&precip));
    let temp_path = write(&dir, "temperature.xml", &noaa_xml(&temp));

    let precip = FileSource::new(precip_path).load().unwrap();
    let temp = FileSource::new(temp_path).load().unwrap();

    let config = PosterConfig::default();
    let marks = MarkPipeline::from_config(&config, &precip, &temp)
        .unwrap()
        .generate(&precip, &temp)
        .unwrap();
    assert_eq!(marks.len(), 100);
    assert!(marks.windows(2).all(|w| w[1].diameter > w[0].diameter));
}
