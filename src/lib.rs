//! Interactive explorer for the Titanic passenger dataset.
//!
//! The [`data`] module is the core: a typed in-memory [`data::model::Table`],
//! median age imputation, composable filters and survival statistics. The
//! egui front end in [`app`], [`state`] and [`ui`] only translates widget
//! input into [`data::filter::FilterCriteria`] and renders the results.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod report;
pub mod state;
pub mod ui;

pub use data::filter::{FareRange, FilterCriteria, Predicate};
pub use data::model::{Row, Table, Value};
pub use data::stats::{GroupSurvival, StatisticsSummary};
pub use error::{ExplorerError, Result};
