//! Writes a deterministic 100-year sample: `precipitation.xml`,
//! `temperature.xml` (NOAA layout) and `climate.parquet`.
//!
//! Usage: `generate_sample [OUTPUT_DIR]`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: i64 = 1917;
const YEARS: usize = 100;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One annual series: rounded to two decimals like the NOAA exports.
fn series(rng: &mut SimpleRng, mean: f64, trend_per_year: f64, std_dev: f64) -> Vec<f64> {
    (0..YEARS)
        .map(|i| {
            let v = rng.gauss(mean + trend_per_year * i as f64, std_dev);
            (v * 100.0).round() / 100.0
        })
        .collect()
}

fn noaa_xml(title: &str, units: &str, values: &[f64]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<dataCollection>\n");
    xml.push_str(&format!(
        "  <description>\n    <title>{title}</title>\n    <units>{units}</units>\n    \
         <base_period>1901-2000</base_period>\n    <missing>-99</missing>\n  </description>\n"
    ));
    for (i, v) in values.iter().enumerate() {
        xml.push_str(&format!(
            "  <data><date>{}12</date><value>{v:.2}</value></data>\n",
            FIRST_YEAR + i as i64
        ));
    }
    xml.push_str("</dataCollection>\n");
    xml
}

fn write_parquet(path: &Path, precipitation: &[f64], temperature: &[f64]) -> Result<()> {
    let years: Vec<i64> = (0..YEARS as i64).map(|i| FIRST_YEAR + i).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("precipitation", DataType::Float64, false),
        Field::new("temperature", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(years)),
            Arc::new(Float64Array::from(precipitation.to_vec())),
            Arc::new(Float64Array::from(temperature.to_vec())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(1917);
    // Colorado-like statewide annual totals and means.
    let precipitation = series(&mut rng, 17.5, 0.0, 2.6);
    let temperature = series(&mut rng, 44.6, 0.02, 0.9);

    let files = [
        (
            "precipitation.xml",
            noaa_xml("Colorado, Precipitation, January-December", "Inches", &precipitation),
        ),
        (
            "temperature.xml",
            noaa_xml(
                "Colorado, Average Temperature, January-December",
                "Degrees Fahrenheit",
                &temperature,
            ),
        ),
    ];
    for (name, contents) in &files {
        let path = out_dir.join(name);
        std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }

    let parquet_path = out_dir.join("climate.parquet");
    write_parquet(&parquet_path, &precipitation, &temperature)?;

    println!(
        "Wrote {YEARS} years ({FIRST_YEAR}-{}) to {}",
        FIRST_YEAR + YEARS as i64 - 1,
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_has_one_record_per_line() {
        let xml = noaa_xml("t", "u", &[14.93, 11.85]);
        assert_eq!(xml.matches("<data>").count(), 2);
        assert!(xml.contains("  <data><date>191712</date><value>14.93</value></data>\n"));
        assert!(xml.contains("  <data><date>191812</date><value>11.85</value></data>\n"));
        assert!(xml.contains("</description>\n  <data>"));
        assert!(xml.ends_with("</dataCollection>\n"));
    }
}
