use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;
use crate::error::{MarkError, Result};

// ---------------------------------------------------------------------------
// Linear mapping
// ---------------------------------------------------------------------------

/// Rescale `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The result is not clamped: inputs outside the source range extrapolate
/// past the target range along the same line.
pub fn map_linear(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<f64> {
    let span = in_max - in_min;
    if span == 0.0 {
        return Err(MarkError::config(format!(
            "degenerate mapping range: in_min == in_max == {in_min}"
        )));
    }
    Ok(out_min + (out_max - out_min) * (value - in_min) / span)
}

// ---------------------------------------------------------------------------
// MappingRange
// ---------------------------------------------------------------------------

/// Source and target bounds for one visual attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingRange {
    pub in_min: f64,
    pub in_max: f64,
    pub out_min: f64,
    pub out_max: f64,
}

impl MappingRange {
    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Self {
        MappingRange {
            in_min,
            in_max,
            out_min,
            out_max,
        }
    }

    /// Derive the source bounds from the observed min/max of a dataset.
    pub fn from_observed(dataset: &Dataset, out_min: f64, out_max: f64) -> Result<Self> {
        let (Some(in_min), Some(in_max)) = (dataset.min(), dataset.max()) else {
            return Err(MarkError::config(format!(
                "cannot derive a mapping range from empty dataset '{}'",
                dataset.name
            )));
        };
        let range = MappingRange::new(in_min, in_max, out_min, out_max);
        range.validate()?;
        Ok(range)
    }

    /// Reject non-finite bounds and a zero-width source range.
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.in_min, self.in_max, self.out_min, self.out_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(MarkError::config(format!("non-finite mapping range: {self:?}")));
        }
        if self.in_min == self.in_max {
            return Err(MarkError::config(format!(
                "degenerate mapping range: in_min == in_max == {}",
                self.in_min
            )));
        }
        Ok(())
    }

    pub fn map(&self, value: f64) -> Result<f64> {
        map_linear(value, self.in_min, self.in_max, self.out_min, self.out_max)
    }
}
