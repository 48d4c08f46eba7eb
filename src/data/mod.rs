//! Data layer: core types, loading, preprocessing, filtering and statistics.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ preprocess │  fill missing ages with the column median
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterCriteria → narrowed Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  stats    │  StatisticsSummary, survival by group
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod preprocess;
pub mod stats;

use std::path::Path;

use crate::error::Result;

/// Load a table and normalise it in one step.
pub fn load_and_preprocess(path: &Path) -> Result<model::Table> {
    let table = loader::load_file(path)?;
    preprocess::preprocess(&table)
}
