//! Display formatting for statistics. Absent averages are suppressed here,
//! not in the aggregator.

use crate::data::stats::StatisticsSummary;

pub fn total_count(summary: &StatisticsSummary) -> String {
    format!("Total records: {}", summary.total_count)
}

pub fn average_fare(summary: &StatisticsSummary) -> Option<String> {
    summary.average_fare.map(|v| format!("Average fare: {v:.2}"))
}

pub fn average_age(summary: &StatisticsSummary) -> Option<String> {
    summary.average_age.map(|v| format!("Average age: {v:.1}"))
}

/// Label of the survived filter value.
pub fn survived_label(survived: Option<i64>) -> &'static str {
    match survived {
        None => "All",
        Some(1) => "Yes",
        Some(_) => "No",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_present_averages() {
        let s = StatisticsSummary {
            total_count: 3,
            average_fare: Some(53.333333),
            average_age: Some(29.24),
        };
        assert_eq!(total_count(&s), "Total records: 3");
        assert_eq!(average_fare(&s).as_deref(), Some("Average fare: 53.33"));
        assert_eq!(average_age(&s).as_deref(), Some("Average age: 29.2"));
    }

    #[test]
    fn test_suppresses_absent_averages() {
        let s = StatisticsSummary {
            total_count: 0,
            average_fare: None,
            average_age: None,
        };
        assert_eq!(total_count(&s), "Total records: 0");
        assert!(average_fare(&s).is_none());
        assert!(average_age(&s).is_none());
    }

    #[test]
    fn test_survived_labels() {
        assert_eq!(survived_label(None), "All");
        assert_eq!(survived_label(Some(1)), "Yes");
        assert_eq!(survived_label(Some(0)), "No");
    }
}
