//! Row matching for the filter stage
//!
//! The global pattern is matched against every column's stringified value;
//! per-column patterns are always case-insensitive substring matches and
//! AND-compose with the global pattern and with each other. Null cells
//! stringify to "" and therefore never match a non-empty pattern.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::datatable::DataTable;
use crate::view::state::FilterState;

/// How the global filter pattern is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Case-insensitive substring match
    Substring,
    /// Case-insensitive regular expression
    Regex,
    /// Fuzzy match scored by SkimMatcherV2
    Fuzzy,
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::Substring
    }
}

/// Applies the active filters to a table and yields the surviving row indices
pub struct RowFilter {
    mode: FilterMode,
    fuzzy_threshold: i64,
    matcher: SkimMatcherV2,
}

impl Clone for RowFilter {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            fuzzy_threshold: self.fuzzy_threshold,
            matcher: SkimMatcherV2::default(), // Create new matcher
        }
    }
}

impl RowFilter {
    pub fn new(mode: FilterMode, fuzzy_threshold: i64) -> Self {
        Self {
            mode,
            fuzzy_threshold,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Return the indices of rows matching the active filters, in input order
    pub fn matching_rows(&self, table: &DataTable, filter: &FilterState) -> Vec<usize> {
        let global = filter.global.trim();
        let global_lower = global.to_lowercase();

        // Resolve column patterns to indices once; unknown keys drop out here
        let column_filters: Vec<(usize, String)> = filter
            .columns
            .iter()
            .filter(|(_, pattern)| !pattern.is_empty())
            .filter_map(|(key, pattern)| {
                table
                    .get_column_index(key)
                    .map(|idx| (idx, pattern.to_lowercase()))
            })
            .collect();

        (0..table.row_count())
            .filter(|&row_idx| {
                self.global_matches(table, row_idx, global, &global_lower, filter.regex.as_ref())
                    && Self::column_filters_match(table, row_idx, &column_filters)
            })
            .collect()
    }

    /// A row passes the global filter if any column's stringified value matches
    fn global_matches(
        &self,
        table: &DataTable,
        row_idx: usize,
        global: &str,
        global_lower: &str,
        regex: Option<&Regex>,
    ) -> bool {
        if global.is_empty() {
            return true;
        }

        let col_count = table.column_count();
        match self.mode {
            FilterMode::Substring => (0..col_count).any(|col| {
                table
                    .get_value(row_idx, col)
                    .is_some_and(|v| v.to_string().to_lowercase().contains(global_lower))
            }),
            FilterMode::Regex => {
                let Some(re) = regex else {
                    return true;
                };
                (0..col_count).any(|col| {
                    table
                        .get_value(row_idx, col)
                        .is_some_and(|v| re.is_match(&v.to_string()))
                })
            }
            FilterMode::Fuzzy => {
                let mut best_score = 0i64;
                for col in 0..col_count {
                    if let Some(value) = table.get_value(row_idx, col) {
                        if let Some(score) = self.matcher.fuzzy_match(&value.to_string(), global) {
                            best_score = best_score.max(score);
                        }
                    }
                }
                best_score > self.fuzzy_threshold
            }
        }
    }

    fn column_filters_match(
        table: &DataTable,
        row_idx: usize,
        column_filters: &[(usize, String)],
    ) -> bool {
        column_filters.iter().all(|(col, pattern_lower)| {
            table
                .get_value(row_idx, *col)
                .is_some_and(|v| v.to_string().to_lowercase().contains(pattern_lower.as_str()))
        })
    }
}

/// Compile a global pattern for regex mode, case-insensitively
/// Returns None for patterns that do not compile
pub fn compile_filter_regex(pattern: &str) -> Option<Regex> {
    regex::RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};

    fn people_table() -> DataTable {
        let mut table = DataTable::new("people");
        table.add_column(DataColumn::new("name"));
        table.add_column(DataColumn::new("city"));

        for (name, city) in [
            ("Alice", "Amsterdam"),
            ("Bob", "Berlin"),
            ("Carol", "amsterdam"),
        ] {
            table
                .add_row(DataRow::new(vec![
                    DataValue::String(name.to_string()),
                    DataValue::String(city.to_string()),
                ]))
                .unwrap();
        }
        table
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let table = people_table();
        let row_filter = RowFilter::new(FilterMode::Substring, 0);

        let mut filter = FilterState::default();
        filter.global = "AMSTERDAM".to_string();

        assert_eq!(row_filter.matching_rows(&table, &filter), vec![0, 2]);
    }

    #[test]
    fn test_empty_global_retains_all() {
        let table = people_table();
        let row_filter = RowFilter::new(FilterMode::Substring, 0);

        let mut filter = FilterState::default();
        filter.global = "   ".to_string();

        assert_eq!(row_filter.matching_rows(&table, &filter), vec![0, 1, 2]);
    }

    #[test]
    fn test_column_filters_and_compose() {
        let table = people_table();
        let row_filter = RowFilter::new(FilterMode::Substring, 0);

        let mut filter = FilterState::default();
        filter.global = "a".to_string(); // matches all three rows somewhere
        filter
            .columns
            .insert("city".to_string(), "berlin".to_string());

        assert_eq!(row_filter.matching_rows(&table, &filter), vec![1]);
    }

    #[test]
    fn test_null_cell_never_matches() {
        let mut table = DataTable::new("t");
        table.add_column(DataColumn::new("v"));
        table
            .add_row(DataRow::new(vec![DataValue::String("x".to_string())]))
            .unwrap();
        table.add_row(DataRow::new(vec![DataValue::Null])).unwrap();

        let row_filter = RowFilter::new(FilterMode::Substring, 0);
        let mut filter = FilterState::default();
        filter.columns.insert("v".to_string(), "x".to_string());

        assert_eq!(row_filter.matching_rows(&table, &filter), vec![0]);
    }

    #[test]
    fn test_regex_mode() {
        let table = people_table();
        let row_filter = RowFilter::new(FilterMode::Regex, 0);

        let mut filter = FilterState::default();
        filter.global = "^B".to_string();
        filter.regex = compile_filter_regex(&filter.global);

        assert_eq!(row_filter.matching_rows(&table, &filter), vec![1]);
    }

    #[test]
    fn test_fuzzy_mode() {
        let table = people_table();
        let row_filter = RowFilter::new(FilterMode::Fuzzy, 0);

        let mut filter = FilterState::default();
        filter.global = "alc".to_string(); // subsequence of "Alice"

        let matches = row_filter.matching_rows(&table, &filter);
        assert!(matches.contains(&0));
        assert!(!matches.contains(&1));
    }

    #[test]
    fn test_invalid_regex_does_not_compile() {
        assert!(compile_filter_regex("[unclosed").is_none());
        assert!(compile_filter_regex("^B").is_some());
    }
}
