//! Data → marks: one coloured circle per grid cell.

use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_rgb, Color};
use crate::config::PosterConfig;
use crate::data::align::align;
use crate::data::model::Dataset;
use crate::error::{MarkError, Result};
use crate::layout::GridSpec;
use crate::mapping::MappingRange;

// ---------------------------------------------------------------------------
// Output unit
// ---------------------------------------------------------------------------

/// One circle on the poster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualMark {
    /// Position in the input series, `row * cols + col`.
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Top-left corner of the circle's bounding box.
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    /// Hue in degrees before conversion; not wrapped.
    pub hue: f64,
    pub color: Color,
}

impl VisualMark {
    pub fn center(&self) -> (f64, f64) {
        let r = self.diameter / 2.0;
        (self.x + r, self.y + r)
    }
}

/// Saturation and lightness shared by every mark, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    pub saturation: f64,
    pub lightness: f64,
}

// ---------------------------------------------------------------------------
// MarkPipeline
// ---------------------------------------------------------------------------

/// Maps precipitation to diameter and temperature to hue over a fixed grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkPipeline {
    pub grid: GridSpec,
    pub precip_range: MappingRange,
    pub temp_range: MappingRange,
    pub style: MarkStyle,
}

impl MarkPipeline {
    pub fn new(
        grid: GridSpec,
        precip_range: MappingRange,
        temp_range: MappingRange,
        style: MarkStyle,
    ) -> Self {
        MarkPipeline {
            grid,
            precip_range,
            temp_range,
            style,
        }
    }

    /// Resolve the configured ranges against the loaded series.
    pub fn from_config(config: &PosterConfig, precip: &Dataset, temp: &Dataset) -> Result<Self> {
        config.pipeline(precip, temp)
    }

    /// Compute every mark, in row-major order.
    ///
    /// Either all `rows * cols` marks are returned or an error is; the
    /// inputs are never modified.
    pub fn generate(&self, precip: &Dataset, temp: &Dataset) -> Result<Vec<VisualMark>> {
        self.grid.validate()?;
        self.precip_range.validate()?;
        self.temp_range.validate()?;

        let pairs = align(precip, temp)?;
        if let Some(k) = pairs.iter().position(|(p, t)| !p.is_finite() || !t.is_finite()) {
            let (p, t) = pairs[k];
            return Err(MarkError::config(format!(
                "record {k} is not finite (precipitation {p}, temperature {t})"
            )));
        }
        if pairs.len() != self.grid.cell_count() {
            return Err(MarkError::LengthMismatch {
                expected: self.grid.cell_count(),
                actual: pairs.len(),
            });
        }

        log::debug!(
            "Mapping {} pairs onto a {}x{} grid",
            pairs.len(),
            self.grid.rows,
            self.grid.cols
        );

        let marks = self
            .grid
            .cells()
            .map(|(k, row, col)| {
                let (precip_value, temp_value) = pairs[k];
                let diameter = self.precip_range.map(precip_value)?;
                let hue = self.temp_range.map(temp_value)?;
                let color = hsl_to_rgb(hue, self.style.saturation, self.style.lightness);
                let cell = self
                    .grid
                    .cell(row, col)
                    .ok_or_else(|| MarkError::config(format!("cell ({row}, {col}) outside grid")))?;
                let (x, y) = cell.place(diameter);
                Ok(VisualMark {
                    index: k,
                    row,
                    col,
                    x,
                    y,
                    diameter,
                    hue,
                    color,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Generated {} marks", marks.len());
        Ok(marks)
    }
}

/// Free-function form of [`MarkPipeline::generate`].
pub fn generate(
    precip: &Dataset,
    temp: &Dataset,
    grid: &GridSpec,
    precip_range: &MappingRange,
    temp_range: &MappingRange,
    style: &MarkStyle,
) -> Result<Vec<VisualMark>> {
    MarkPipeline::new(grid.clone(), *precip_range, *temp_range, *style).generate(precip, temp)
}
