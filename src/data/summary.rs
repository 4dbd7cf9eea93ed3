use super::filter::FilteredView;
use super::model::Column;

/// Aggregate statistics over a filtered view. Medians are `None` when the
/// column is absent or has no values in the view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryScalars {
    pub row_count: usize,
    pub median_price: Option<f64>,
    pub median_odometer: Option<f64>,
    pub median_year: Option<f64>,
}

pub fn summarize(view: &FilteredView) -> SummaryScalars {
    SummaryScalars {
        row_count: view.len(),
        median_price: column_median(view, Column::Price),
        median_odometer: column_median(view, Column::Odometer),
        median_year: column_median(view, Column::ModelYear),
    }
}

fn column_median(view: &FilteredView, column: Column) -> Option<f64> {
    if !view.has(column) {
        return None;
    }
    median(&mut view.numbers(column))
}

/// Standard median: the middle value, or the mean of the two middle values
/// for an even count.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
