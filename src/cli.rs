//! Command-line arguments using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::FilterCriteria;
use crate::data::model::columns;

/// Titanic Explorer: filter passengers and inspect survival statistics
#[derive(Debug, Parser)]
#[command(name = "titanic-explorer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Passenger data file (CSV, JSON or Parquet)
    #[arg(value_name = "FILE", default_value = "titanic_train.csv")]
    pub data: PathBuf,

    /// Image shown above the filter panel, skipped if the file is absent
    #[arg(long, value_name = "IMAGE", default_value = "titanic.jpg")]
    pub banner: PathBuf,

    /// Print a JSON report to stdout instead of opening the window
    #[arg(long)]
    pub report: bool,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Filters applied by the headless report.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Keep passengers of this sex only
    #[arg(long)]
    pub sex: Option<String>,

    /// Keep survivors (1) or non-survivors (0) only
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub survived: Option<i64>,

    /// Allowed passenger class; repeat for several
    #[arg(long)]
    pub pclass: Vec<i64>,

    /// Lowest fare kept (inclusive)
    #[arg(long)]
    pub fare_min: Option<f64>,

    /// Highest fare kept (inclusive)
    #[arg(long)]
    pub fare_max: Option<f64>,

    /// Column to break survival down by
    #[arg(long, default_value = columns::SEX)]
    pub group_by: String,
}

impl FilterArgs {
    /// Translate the flags into filter criteria. A one-sided fare bound is
    /// left open on the other side.
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria {
            sex: self.sex.clone(),
            survived: self.survived,
            pclass: self.pclass.iter().copied().collect(),
            fare_range: None,
        };
        if self.fare_min.is_some() || self.fare_max.is_some() {
            criteria = criteria.with_fare_range(
                self.fare_min.unwrap_or(f64::NEG_INFINITY),
                self.fare_max.unwrap_or(f64::INFINITY),
            );
        }
        criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["titanic-explorer"]);
        assert_eq!(cli.data, PathBuf::from("titanic_train.csv"));
        assert!(!cli.report);
        assert!(cli.filters.criteria().is_unconstrained());
        assert_eq!(cli.filters.group_by, "Sex");
    }

    #[test]
    fn test_filter_flags_to_criteria() {
        let cli = Cli::parse_from([
            "titanic-explorer",
            "data.csv",
            "--report",
            "--sex",
            "female",
            "--survived",
            "0",
            "--pclass",
            "1",
            "--pclass",
            "2",
            "--fare-min",
            "10",
        ]);
        let c = cli.filters.criteria();
        assert_eq!(c.sex.as_deref(), Some("female"));
        assert_eq!(c.survived, Some(0));
        assert_eq!(c.pclass.len(), 2);
        let range = c.fare_range.unwrap();
        assert_eq!(range.min, 10.0);
        assert!(range.max.is_infinite());
    }

    #[test]
    fn test_survived_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["titanic-explorer", "--survived", "2"]).is_err());
    }
}
