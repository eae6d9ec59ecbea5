//! Poster configuration, read from JSON.
//!
//! Every number the pipeline uses lives here; [`PosterConfig::default`] is the
//! Colorado 1917–2016 poster (24″×36″ at 72 dpi, 10×10 grid).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;
use crate::layout::GridSpec;
use crate::mapping::MappingRange;
use crate::pipeline::{MarkPipeline, MarkStyle};

// ---------------------------------------------------------------------------
// RangeSetting – fixed bounds or observed extremes
// ---------------------------------------------------------------------------

/// How a dataset's values are mapped onto a visual attribute.
///
/// In JSON, a range with `in_min`/`in_max` is fixed; one with only
/// `out_min`/`out_max` takes its source bounds from the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSetting {
    Fixed(MappingRange),
    Observed(ObservedRange),
}

/// Output bounds only; the input bounds come from the dataset.
///
/// Unknown fields are an error so that a fixed range with a missing or
/// misspelt key is reported instead of silently read as observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservedRange {
    pub out_min: f64,
    pub out_max: f64,
}

impl RangeSetting {
    pub fn resolve(&self, dataset: &Dataset) -> crate::error::Result<MappingRange> {
        match *self {
            RangeSetting::Fixed(range) => Ok(range),
            RangeSetting::Observed(ObservedRange { out_min, out_max }) => {
                let range = MappingRange::from_observed(dataset, out_min, out_max)?;
                log::info!(
                    "Observed range for '{}': {} – {}",
                    dataset.name,
                    range.in_min,
                    range.in_max
                );
                Ok(range)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PosterConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterConfig {
    pub grid: GridSpec,
    /// Precipitation → circle diameter.
    pub precip_range: RangeSetting,
    /// Temperature → hue in degrees.
    pub temp_range: RangeSetting,
    pub saturation: f64,
    pub lightness: f64,
}

impl Default for PosterConfig {
    fn default() -> Self {
        PosterConfig {
            grid: GridSpec::new(10, 10, 1692.0, 2556.0, 18.0),
            precip_range: RangeSetting::Fixed(MappingRange::new(11.85, 25.52, 78.5, 169.2)),
            temp_range: RangeSetting::Fixed(MappingRange::new(42.5, 48.3, 242.0, 360.0)),
            saturation: 100.0,
            lightness: 40.0,
        }
    }
}

impl PosterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PosterConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing config")
    }

    /// Checks that do not need the data; observed ranges are checked once
    /// they are resolved.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.grid.validate()?;
        for setting in [&self.precip_range, &self.temp_range] {
            if let RangeSetting::Fixed(range) = setting {
                range.validate()?;
            }
        }
        Ok(())
    }

    pub fn style(&self) -> MarkStyle {
        MarkStyle {
            saturation: self.saturation,
            lightness: self.lightness,
        }
    }

    /// Resolve both ranges against the loaded series and build the pipeline.
    pub fn pipeline(&self, precip: &Dataset, temp: &Dataset) -> crate::error::Result<MarkPipeline> {
        self.validate()?;
        Ok(MarkPipeline::new(
            self.grid.clone(),
            self.precip_range.resolve(precip)?,
            self.temp_range.resolve(temp)?,
            self.style(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_colorado_poster() {
        let config = PosterConfig::default();
        assert_eq!(config.grid.cell_count(), 100);
        assert_eq!(config.grid.document_size(), (1728.0, 2592.0));
        assert_eq!(config.style().saturation, 100.0);
        assert_eq!(config.style().lightness, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let config = PosterConfig::default();
        let back: PosterConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn observed_range_from_json() {
        let json = r#"{
            "grid": { "rows": 1, "cols": 3, "canvas_width": 300, "canvas_height": 120,
                      "margin": 0, "row_origin": 0, "row_step": 100 },
            "precip_range": { "out_min": 10, "out_max": 90 },
            "temp_range": { "in_min": 0, "in_max": 1, "out_min": 0, "out_max": 360 },
            "saturation": 100,
            "lightness": 40
        }"#;
        let config: PosterConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(config.precip_range, RangeSetting::Observed(_)));
        assert!(matches!(config.temp_range, RangeSetting::Fixed(_)));
        assert_eq!(config.grid.row_step, Some(100.0));

        let precip = Dataset::from_values("p", vec![2.0, 4.0, 6.0]);
        let temp = Dataset::from_values("t", vec![0.0, 0.5, 1.0]);
        let pipeline = MarkPipeline::from_config(&config, &precip, &temp).unwrap();
        assert_eq!(pipeline.precip_range, MappingRange::new(2.0, 6.0, 10.0, 90.0));

        let marks = pipeline.generate(&precip, &temp).unwrap();
        assert_eq!(marks[0].diameter, 10.0);
        assert_eq!(marks[2].diameter, 90.0);
    }

    #[test]
    fn incomplete_fixed_range_is_an_error() {
        // `in_max` missing: neither a fixed nor an observed range.
        let typo = r#"{ "in_min": 1, "out_min": 0, "out_max": 10 }"#;
        assert!(serde_json::from_str::<RangeSetting>(typo).is_err());

        let misspelt = r#"{ "in_min": 1, "in_mx": 2, "out_min": 0, "out_max": 10 }"#;
        assert!(serde_json::from_str::<RangeSetting>(misspelt).is_err());

        let observed = r#"{ "out_min": 0, "out_max": 10 }"#;
        assert_eq!(
            serde_json::from_str::<RangeSetting>(observed).unwrap(),
            RangeSetting::Observed(ObservedRange { out_min: 0.0, out_max: 10.0 })
        );
    }

    #[test]
    fn degenerate_fixed_range_is_rejected() {
        let mut config = PosterConfig::default();
        config.temp_range = RangeSetting::Fixed(MappingRange::new(1.0, 1.0, 0.0, 1.0));
        assert!(config.validate().is_err());
    }
}
