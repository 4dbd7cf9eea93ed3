use super::filter::FilteredView;
use super::model::Column;

/// One equal-width bin. `end` is exclusive except for the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Number of values counted across all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Histogram of the view's odometer readings, or `None` when there is
/// nothing to plot.
pub fn odometer_histogram(view: &FilteredView, bins: usize) -> Option<Histogram> {
    if !view.has(Column::Odometer) {
        return None;
    }
    bin_values(&view.numbers(Column::Odometer), bins)
}

/// Partition `[min, max]` of `values` into `bins` equal-width bins.
pub fn bin_values(values: &[f64], bins: usize) -> Option<Histogram> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.clone().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    })?;

    let bins = bins.max(1);
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect();

    Some(Histogram { bins })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterCriteria};
    use crate::data::model::tests::table;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn zero_to_hundred_in_ten_bins() {
        let h = bin_values(&[0.0, 100.0], 10).expect("histogram");
        assert_eq!(h.bins.len(), 10);
        for (i, bin) in h.bins.iter().enumerate() {
            assert!((bin.start - 10.0 * i as f64).abs() < 1e-9);
            assert!((bin.width() - 10.0).abs() < 1e-9);
        }
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[9].count, 1);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn boundary_values_fall_into_the_upper_bin() {
        let h = bin_values(&[0.0, 10.0, 20.0, 100.0], 10).expect("histogram");
        assert_eq!(h.bins[1].count, 1);
        assert_eq!(h.bins[2].count, 1);
    }

    #[test]
    fn identical_values_get_a_unit_span() {
        let h = bin_values(&[5.0, 5.0, 5.0], 10).expect("histogram");
        assert_eq!(h.total(), 3);
        assert!((h.bins[0].start - 4.5).abs() < 1e-9);
        assert!((h.bins[9].end - 5.5).abs() < 1e-9);
    }

    #[test]
    fn no_values_means_no_histogram() {
        assert_eq!(bin_values(&[], 10), None);
    }

    #[test]
    fn view_without_odometer_has_no_histogram() {
        let t = Arc::new(table(&["price"], &[&["1"]]));
        let view = apply(t, &FilterCriteria::default());
        assert_eq!(odometer_histogram(&view, 10), None);
    }

    #[test]
    fn missing_odometer_cells_are_not_counted() {
        let t = Arc::new(table(&["odometer"], &[&["1"], &[""], &["9"]]));
        let view = apply(t, &FilterCriteria::default());
        assert_eq!(odometer_histogram(&view, 10).expect("histogram").total(), 2);
    }

    proptest! {
        #[test]
        fn counts_sum_to_value_count(
            values in proptest::collection::vec(0.0f64..500_000.0, 1..200),
            bins in 10usize..=120,
        ) {
            let h = bin_values(&values, bins).expect("histogram");
            prop_assert_eq!(h.bins.len(), bins);
            prop_assert_eq!(h.total(), values.len());
        }
    }
}
