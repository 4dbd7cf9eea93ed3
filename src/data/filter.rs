use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Column, Listing, ListingTable};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Inclusive odometer bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdometerRange {
    pub min: f64,
    pub max: f64,
}

impl OdometerRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The conjunction of user-selected constraints.
///
/// An empty categorical set means "no constraint" for that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub conditions: BTreeSet<String>,
    pub types: BTreeSet<String>,
    /// `None` leaves the odometer unconstrained.
    pub odometer: Option<OdometerRange>,
}

impl FilterCriteria {
    /// Accepted values for a categorical column.
    pub fn selected(&self, column: Column) -> Option<&BTreeSet<String>> {
        match column {
            Column::Condition => Some(&self.conditions),
            Column::Type => Some(&self.types),
            _ => None,
        }
    }

    pub fn selected_mut(&mut self, column: Column) -> Option<&mut BTreeSet<String>> {
        match column {
            Column::Condition => Some(&mut self.conditions),
            Column::Type => Some(&mut self.types),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Read-only subset of a shared table: the source rows plus the indices of
/// the rows that passed.
#[derive(Debug, Clone)]
pub struct FilteredView {
    table: Arc<ListingTable>,
    indices: Vec<usize>,
}

impl PartialEq for FilteredView {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.table, &other.table) && self.indices == other.indices
    }
}

impl FilteredView {
    /// View covering every row of the table.
    pub fn full(table: Arc<ListingTable>) -> Self {
        let indices = (0..table.len()).collect();
        Self { table, indices }
    }

    pub fn table(&self) -> &ListingTable {
        &self.table
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn has(&self, column: Column) -> bool {
        self.table.schema.has(column)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Listing> + '_ {
        self.indices.iter().map(move |&i| &self.table.rows[i])
    }

    /// Non-missing values of a numeric column, in view order.
    pub fn numbers(&self, column: Column) -> Vec<f64> {
        self.rows().filter_map(|row| row.number(column)).collect()
    }
}

// ---------------------------------------------------------------------------
// Predicate application
// ---------------------------------------------------------------------------

/// Return the view of rows that pass all active predicates.
///
/// A row passes when:
/// * each categorical set is empty, or its column is absent from the table,
///   or the row's value is in the set;
/// * the odometer range is unset, or the column is absent, or the row has an
///   odometer inside the range (missing odometer fails).
pub fn apply(table: Arc<ListingTable>, criteria: &FilterCriteria) -> FilteredView {
    let schema = &table.schema;

    let categorical: Vec<(Column, &BTreeSet<String>)> = [Column::Condition, Column::Type]
        .into_iter()
        .filter_map(|col| Some((col, criteria.selected(col)?)))
        .filter(|(col, selected)| !selected.is_empty() && schema.has(*col))
        .collect();

    let odometer = criteria.odometer.filter(|_| schema.has(Column::Odometer));

    if categorical.is_empty() && odometer.is_none() {
        return FilteredView::full(table);
    }

    let indices = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            for (col, selected) in &categorical {
                match row.text(*col) {
                    Some(value) if selected.contains(value) => {}
                    _ => return false,
                }
            }
            if let Some(range) = odometer {
                match row.number(Column::Odometer) {
                    Some(value) if range.contains(value) => {}
                    _ => return false,
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;
    use proptest::prelude::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Arc<ListingTable> {
        Arc::new(table(
            &["price", "odometer", "condition", "type"],
            &[
                &["100", "10", "good", "sedan"],
                &["200", "20", "fair", "SUV"],
                &["300", "30", "good", "SUV"],
                &["400", "", "excellent", "truck"],
            ],
        ))
    }

    #[test]
    fn no_active_predicates_keeps_everything() {
        let t = sample();
        let view = apply(Arc::clone(&t), &FilterCriteria::default());
        assert_eq!(view.indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn condition_filter_keeps_matching_rows() {
        let t = Arc::new(table(&["condition"], &[&["good"], &["fair"], &["good"]]));
        let criteria = FilterCriteria {
            conditions: set(&["good"]),
            ..Default::default()
        };
        let view = apply(t, &criteria);
        assert_eq!(view.len(), 2);
        assert!(view.rows().all(|r| r.text(Column::Condition) == Some("good")));
    }

    #[test]
    fn predicates_are_combined_with_and() {
        let criteria = FilterCriteria {
            conditions: set(&["good"]),
            types: set(&["SUV"]),
            odometer: None,
        };
        let view = apply(sample(), &criteria);
        assert_eq!(view.indices(), &[2]);
    }

    #[test]
    fn type_filter_on_table_without_type_column_is_ignored() {
        let t = Arc::new(table(
            &["condition", "odometer"],
            &[&["good", "5"], &["fair", "50"], &["good", "500"]],
        ));
        let with_type = FilterCriteria {
            conditions: set(&["good"]),
            types: set(&["SUV"]),
            odometer: Some(OdometerRange::new(0.0, 100.0)),
        };
        let without_type = FilterCriteria {
            types: BTreeSet::new(),
            ..with_type.clone()
        };
        assert_eq!(
            apply(Arc::clone(&t), &with_type),
            apply(Arc::clone(&t), &without_type)
        );
        assert_eq!(apply(t, &with_type).indices(), &[0]);
    }

    #[test]
    fn odometer_range_is_inclusive_and_drops_missing() {
        let criteria = FilterCriteria {
            odometer: Some(OdometerRange::new(10.0, 30.0)),
            ..Default::default()
        };
        let view = apply(sample(), &criteria);
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn odometer_range_without_column_is_skipped() {
        let t = Arc::new(table(&["price"], &[&["1"], &["2"]]));
        let criteria = FilterCriteria {
            odometer: Some(OdometerRange::new(100.0, 200.0)),
            ..Default::default()
        };
        assert_eq!(apply(t, &criteria).len(), 2);
    }

    #[test]
    fn full_observed_range_is_identity() {
        let t = Arc::new(table(&["odometer"], &[&["7"], &["3"], &["42"]]));
        let range = OdometerRange::new(
            t.min_of(Column::Odometer).unwrap(),
            t.max_of(Column::Odometer).unwrap(),
        );
        let criteria = FilterCriteria {
            odometer: Some(range),
            ..Default::default()
        };
        assert_eq!(apply(Arc::clone(&t), &criteria), FilteredView::full(t));
    }

    #[test]
    fn filters_excluding_everything_give_an_empty_view() {
        let criteria = FilterCriteria {
            conditions: set(&["salvage"]),
            ..Default::default()
        };
        let view = apply(sample(), &criteria);
        assert!(view.is_empty());
        assert!(view.numbers(Column::Price).is_empty());
    }

    #[test]
    fn source_table_is_untouched() {
        let t = sample();
        let before = (*t).clone();
        let criteria = FilterCriteria {
            conditions: set(&["fair"]),
            ..Default::default()
        };
        let _ = apply(Arc::clone(&t), &criteria);
        assert_eq!(*t, before);
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        let names = prop::sample::subsequence(vec!["good", "fair", "excellent", "salvage"], 0..=4);
        let kinds = prop::sample::subsequence(vec!["sedan", "SUV", "truck"], 0..=3);
        let range = proptest::option::of((0.0f64..50.0, 0.0f64..50.0));
        (names, kinds, range).prop_map(|(c, k, r)| FilterCriteria {
            conditions: c.into_iter().map(str::to_string).collect(),
            types: k.into_iter().map(str::to_string).collect(),
            odometer: r.map(|(a, b)| OdometerRange::new(a.min(b), a.max(b))),
        })
    }

    proptest! {
        #[test]
        fn view_is_never_larger_than_table(criteria in arb_criteria()) {
            let t = sample();
            let view = apply(Arc::clone(&t), &criteria);
            prop_assert!(view.len() <= t.len());
        }

        #[test]
        fn filtering_is_idempotent(criteria in arb_criteria()) {
            let t = sample();
            let first = apply(Arc::clone(&t), &criteria);
            let second = apply(Arc::clone(&t), &criteria);
            prop_assert_eq!(first, second);
        }
    }
}
