//! Data layer: annual series, loading, and alignment.
//!
//! Architecture:
//! ```text
//!  .xml / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  DataSource → Dataset
//!   └──────────┘
//!        │  (precipitation, temperature)
//!        ▼
//!   ┌──────────┐
//!   │  align    │  index-wise pairs, equal length enforced
//!   └──────────┘
//! ```

pub mod align;
pub mod loader;
pub mod model;
