//! Cell geometry for the R×C poster grid.

use serde::{Deserialize, Serialize};

use crate::error::{MarkError, Result};

// ---------------------------------------------------------------------------
// GridSpec
// ---------------------------------------------------------------------------

/// Grid shape and the canvas it is laid out in.
///
/// Rows are placed with their own origin and step, independent of the
/// column geometry. When unset they follow the Colorado poster convention:
/// the first row starts at `canvas_height / 6` and rows advance by the cell
/// *width*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub margin: f64,
    /// Top of the first row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_origin: Option<f64>,
    /// Vertical distance between consecutive rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_step: Option<f64>,
}

/// Top-left corner and size of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub x: f64,
    pub y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellGeometry {
    /// Offset that centres a mark of `diameter` in the cell, on both axes.
    pub fn centering_offset(&self, diameter: f64) -> f64 {
        (self.cell_width - diameter) / 2.0
    }

    /// Top-left corner of a centred mark's bounding box.
    pub fn place(&self, diameter: f64) -> (f64, f64) {
        let offset = self.centering_offset(diameter);
        (self.x + offset, self.y + offset)
    }
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize, canvas_width: f64, canvas_height: f64, margin: f64) -> Self {
        GridSpec {
            rows,
            cols,
            canvas_width,
            canvas_height,
            margin,
            row_origin: None,
            row_step: None,
        }
    }

    /// `rows * cols`, or `None` if the product does not fit in `usize`.
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// `rows * cols`, saturating at `usize::MAX`; [`GridSpec::validate`]
    /// rejects grids where that matters.
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    pub fn cell_width(&self) -> f64 {
        self.canvas_width / self.cols as f64
    }

    pub fn cell_height(&self) -> f64 {
        self.canvas_height / self.rows as f64
    }

    pub fn effective_row_origin(&self) -> f64 {
        self.row_origin.unwrap_or(self.canvas_height / 6.0)
    }

    pub fn effective_row_step(&self) -> f64 {
        self.row_step.unwrap_or_else(|| self.cell_width())
    }

    /// Full artboard: the canvas plus the margin on every side.
    pub fn document_size(&self) -> (f64, f64) {
        (
            self.canvas_width + 2.0 * self.margin,
            self.canvas_height + 2.0 * self.margin,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MarkError::config(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.checked_cell_count().is_none() {
            return Err(MarkError::config(format!(
                "{}x{} grid has too many cells",
                self.rows, self.cols
            )));
        }
        for (label, v) in [("canvas_width", self.canvas_width), ("canvas_height", self.canvas_height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(MarkError::config(format!("{label} must be positive, got {v}")));
            }
        }
        let optional = [self.row_origin, self.row_step];
        if !self.margin.is_finite() || optional.iter().flatten().any(|v| !v.is_finite()) {
            return Err(MarkError::config("grid offsets must be finite"));
        }
        Ok(())
    }

    /// Geometry of the cell at `(row, col)`, `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellGeometry> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let cell_width = self.cell_width();
        Some(CellGeometry {
            x: self.margin + col as f64 * cell_width,
            y: self.effective_row_origin() + row as f64 * self.effective_row_step(),
            cell_width,
            cell_height: self.cell_height(),
        })
    }

    /// `(k, row, col)` for every cell, row-major, with `k = row * cols + col`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (row * self.cols + col, row, col)))
    }
}

/// Free-function form of [`GridSpec::cell`].
pub fn cell_origin(row: usize, col: usize, spec: &GridSpec) -> Option<CellGeometry> {
    spec.cell(row, col)
}
