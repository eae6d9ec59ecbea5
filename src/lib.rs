//! Paired annual climate series → a poster grid of coloured circles.
//!
//! ```text
//!  precipitation ─┐
//!                 ├─ align ─ map (diameter, hue) ─ HSL→RGB ─ grid layout ─ Vec<VisualMark> ─ Renderer
//!  temperature ───┘
//! ```

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod mapping;
pub mod pipeline;
pub mod render;

pub use color::{hsl_to_rgb, hue_to_channel, Color};
pub use config::{ObservedRange, PosterConfig, RangeSetting};
pub use data::align::align;
pub use data::loader::{DataSource, FileSource, MemorySource};
pub use data::model::{DataRecord, Dataset};
pub use error::{MarkError, Result};
pub use layout::{cell_origin, CellGeometry, GridSpec};
pub use mapping::{map_linear, MappingRange};
pub use pipeline::{generate, MarkPipeline, MarkStyle, VisualMark};
pub use render::{render_marks, PngRenderer, Renderer, SvgRenderer};
