//! Headless report: one filter + summarize + group pass printed as JSON.

use serde::Serialize;

use crate::data::filter::{filter, FilterCriteria};
use crate::data::model::Table;
use crate::data::stats::{group_survival, summarize, GroupSurvival, StatisticsSummary};
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub criteria: &'a FilterCriteria,
    pub summary: StatisticsSummary,
    pub group_by: &'a str,
    pub survival: Vec<GroupSurvival>,
}

/// Filter `table` and aggregate the surviving rows.
pub fn build<'a>(table: &Table, criteria: &'a FilterCriteria, group_by: &'a str) -> Result<Report<'a>> {
    let filtered = filter(table, criteria);
    Ok(Report {
        criteria,
        summary: summarize(&filtered),
        group_by,
        survival: group_survival(&filtered, group_by)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;
    use crate::error::ExplorerError;

    fn table() -> Table {
        let rows = vec![
            Row::new().with("Sex", "female").with("Survived", 1i64).with("Fare", 50.0),
            Row::new().with("Sex", "male").with("Survived", 0i64).with("Fare", 10.0),
        ];
        Table::from_rows(vec!["Sex".into(), "Survived".into(), "Fare".into()], rows)
    }

    #[test]
    fn test_report_json_shape() {
        let criteria = FilterCriteria::default().with_sex("female");
        let report = build(&table(), &criteria, "Sex").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["total_count"], 1);
        assert_eq!(json["summary"]["average_fare"], 50.0);
        assert!(json["summary"]["average_age"].is_null());
        assert_eq!(json["survival"][0]["group"], "female");
        assert_eq!(json["criteria"]["sex"], "female");
    }

    #[test]
    fn test_report_rejects_unknown_group_column() {
        let criteria = FilterCriteria::default();
        let err = build(&table(), &criteria, "Cabin").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidColumn(_)));
    }
}
