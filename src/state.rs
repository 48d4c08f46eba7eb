use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::filter::{filter, FareRange, FilterCriteria};
use crate::data::load_and_preprocess;
use crate::data::model::{columns, Table};
use crate::data::stats::{group_survival, summarize, GroupSurvival, StatisticsSummary};

/// Columns with at most this many distinct values are offered for grouping.
const MAX_GROUPS: usize = 12;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Preprocessed dataset (None until a file loads).
    pub table: Option<Table>,

    /// Where `table` was loaded from.
    pub source: Option<PathBuf>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Rows passing the current filters (recomputed on every change).
    pub filtered: Table,

    /// Aggregates of `filtered`.
    pub summary: StatisticsSummary,

    /// Column the survival chart is grouped by.
    pub group_column: String,

    /// Survival breakdown of `filtered` by `group_column`.
    pub groups: Vec<GroupSurvival>,

    /// Bar colours per group value.
    pub color_map: Option<ColorMap>,

    /// Optional image shown above the filters.
    pub banner: Option<PathBuf>,

    /// Load failure shown in the UI.
    pub status_message: Option<String>,

    /// Why the survival breakdown is unavailable, if it is.
    pub group_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let filtered = Table::default();
        Self {
            table: None,
            source: None,
            criteria: FilterCriteria::default(),
            summary: summarize(&filtered),
            filtered,
            group_column: columns::SEX.to_string(),
            groups: Vec::new(),
            color_map: None,
            banner: None,
            status_message: None,
            group_error: None,
        }
    }
}

impl AppState {
    /// Load and preprocess a file. Failures end up in `status_message`.
    pub fn load_path(&mut self, path: &Path) {
        match load_and_preprocess(path) {
            Ok(table) => {
                self.source = Some(path.to_path_buf());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table and reset filters to show everything.
    pub fn set_table(&mut self, table: Table) {
        self.criteria = FilterCriteria {
            sex: None,
            survived: None,
            pclass: self.class_options_of(&table).into_iter().collect(),
            fare_range: table
                .numeric_range(columns::FARE)
                .map(|(lo, hi)| FareRange::new(lo, hi)),
        };

        if !table.has_column(&self.group_column) {
            if let Some(first) = groupable_columns(&table).into_iter().next() {
                self.group_column = first;
            }
        }
        self.color_map = table
            .unique_values(&self.group_column)
            .map(|vals| ColorMap::new(vals));

        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    fn class_options_of(&self, table: &Table) -> Vec<i64> {
        table
            .unique_values(columns::PCLASS)
            .map(|vals| vals.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default()
    }

    /// Distinct passenger classes in the loaded table, ascending.
    pub fn class_options(&self) -> Vec<i64> {
        self.table
            .as_ref()
            .map(|t| self.class_options_of(t))
            .unwrap_or_default()
    }

    /// Distinct sexes in the loaded table, ascending.
    pub fn sex_options(&self) -> Vec<String> {
        self.table
            .as_ref()
            .and_then(|t| t.unique_values(columns::SEX))
            .map(|vals| vals.iter().filter_map(|v| v.as_str().map(String::from)).collect())
            .unwrap_or_default()
    }

    /// Min and max fare of the loaded table, bounds for the fare sliders.
    pub fn fare_bounds(&self) -> Option<(f64, f64)> {
        self.table.as_ref()?.numeric_range(columns::FARE)
    }

    /// Columns of the loaded table suitable for a survival breakdown.
    pub fn group_options(&self) -> Vec<String> {
        self.table.as_ref().map(groupable_columns).unwrap_or_default()
    }

    /// One full filter + summarize + group pass over the loaded table.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.filtered = filter(table, &self.criteria);
        self.summary = summarize(&self.filtered);
        match group_survival(&self.filtered, &self.group_column) {
            Ok(groups) => {
                self.groups = groups;
                self.group_error = None;
            }
            Err(e) => {
                log::warn!("Survival breakdown unavailable: {e}");
                self.groups = Vec::new();
                self.group_error = Some(e.to_string());
            }
        }
        log::debug!(
            "{} of {} rows match {:?}",
            self.filtered.len(),
            table.len(),
            self.criteria
        );
    }

    pub fn set_sex(&mut self, sex: Option<String>) {
        self.criteria.sex = sex;
        self.refilter();
    }

    pub fn set_survived(&mut self, survived: Option<i64>) {
        self.criteria.survived = survived;
        self.refilter();
    }

    /// Toggle a single class in the class filter.
    pub fn toggle_class(&mut self, class: i64) {
        if !self.criteria.pclass.remove(&class) {
            self.criteria.pclass.insert(class);
        }
        self.refilter();
    }

    pub fn set_fare_range(&mut self, min: f64, max: f64) {
        self.criteria.fare_range = Some(FareRange::new(min, max));
        self.refilter();
    }

    /// Restore the filters shown after loading.
    pub fn reset_filters(&mut self) {
        if let Some(table) = self.table.take() {
            self.set_table(table);
        }
    }

    /// Set grouping column and rebuild the colour map.
    pub fn set_group_column(&mut self, column: String) {
        self.color_map = self
            .table
            .as_ref()
            .and_then(|t| t.unique_values(&column))
            .map(|vals| ColorMap::new(vals));
        self.group_column = column;
        self.refilter();
    }
}

fn groupable_columns(table: &Table) -> Vec<String> {
    table
        .column_names
        .iter()
        .filter(|c| c.as_str() != columns::SURVIVED)
        .filter(|c| {
            table
                .unique_values(c)
                .is_some_and(|vals| !vals.is_empty() && vals.len() <= MAX_GROUPS)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const CSV: &str = "PassengerId,Survived,Pclass,Name,Sex,Age,Fare\n\
                       1,0,3,Braund,male,22,7.25\n\
                       2,1,1,Cumings,female,38,71.28\n\
                       3,1,3,Heikkinen,female,,7.92\n\
                       4,1,1,Futrelle,female,35,53.1\n\
                       5,0,3,Allen,male,35,8.05\n";

    fn loaded() -> (AppState, NamedTempFile) {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let mut state = AppState::default();
        state.load_path(file.path());
        (state, file)
    }

    #[test]
    fn test_load_selects_everything() {
        let (state, _file) = loaded();
        assert!(state.status_message.is_none());
        assert_eq!(state.filtered.len(), 5);
        assert_eq!(state.class_options(), vec![1, 3]);
        assert_eq!(state.sex_options(), vec!["female", "male"]);
        assert_eq!(state.fare_bounds(), Some((7.25, 71.28)));
        assert_eq!(state.summary.total_count, 5);
        // Heikkinen's age was imputed: median of [22, 35, 35, 38]
        assert_eq!(state.filtered.rows[2].age(), Some(35.0));
    }

    #[test]
    fn test_filter_changes_recompute_everything() {
        let (mut state, _file) = loaded();
        state.set_sex(Some("female".into()));
        assert_eq!(state.summary.total_count, 3);
        state.set_survived(Some(0));
        assert_eq!(state.summary.total_count, 0);
        assert_eq!(state.summary.average_fare, None);
        assert!(state.groups.is_empty());

        state.set_survived(None);
        state.toggle_class(3);
        assert_eq!(state.summary.total_count, 2);
        assert_eq!(state.summary.average_age, Some(36.5));

        state.reset_filters();
        assert_eq!(state.filtered.len(), 5);
    }

    #[test]
    fn test_group_column_options_and_switch() {
        let (mut state, _file) = loaded();
        let options = state.group_options();
        assert!(options.contains(&"Sex".to_string()));
        assert!(options.contains(&"Pclass".to_string()));
        assert!(!options.contains(&"Survived".to_string()));

        state.set_group_column("Pclass".into());
        assert_eq!(state.groups.len(), 2);
        assert_eq!(state.groups[0].survival_rate, 1.0);
    }

    #[test]
    fn test_group_error_clears_after_valid_column() {
        let (mut state, _file) = loaded();
        state.set_group_column("Cabin".into());
        assert!(state.groups.is_empty());
        assert_eq!(
            state.group_error.as_deref(),
            Some("column 'Cabin' not found in data")
        );

        state.set_group_column("Sex".into());
        assert!(state.group_error.is_none());
        assert_eq!(state.groups.len(), 2);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut state = AppState::default();
        state.load_path(Path::new("no_such_titanic.csv"));
        assert!(state.table.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("no_such_titanic.csv"));
    }
}
