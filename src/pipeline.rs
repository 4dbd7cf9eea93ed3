use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::filter::{apply, FilterCriteria, FilteredView, OdometerRange};
use crate::data::histogram::{odometer_histogram, Histogram};
use crate::data::model::{Column, ListingTable};
use crate::data::scatter::{scatter_pairs, ScatterPoint};
use crate::data::summary::{summarize, SummaryScalars};

// ---------------------------------------------------------------------------
// Controls – everything the sidebar feeds into a run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub criteria: FilterCriteria,
    pub bins: usize,
    pub log_price: bool,
    pub show_table: bool,
}

impl Controls {
    /// Initial control state for a freshly loaded table.
    pub fn initial(table: &ListingTable, config: &DashboardConfig) -> Self {
        let first = |column: Column, n: usize| -> BTreeSet<String> {
            table
                .category_values(column)
                .take(n)
                .map(str::to_string)
                .collect()
        };

        let odometer = table.schema.has(Column::Odometer).then(|| {
            let max = table.max_of(Column::Odometer).unwrap_or(0.0);
            OdometerRange::new(0.0, if max > 0.0 { max } else { 1.0 })
        });

        Self {
            criteria: FilterCriteria {
                conditions: first(Column::Condition, config.default_condition_picks),
                types: first(Column::Type, config.default_type_picks),
                odometer,
            },
            bins: config.bins.default,
            log_price: config.log_price_by_default,
            show_table: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot – everything the presentation layer draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub total_rows: usize,
    pub view: FilteredView,
    pub summary: SummaryScalars,
    pub histogram: Option<Histogram>,
    pub scatter: Option<Vec<ScatterPoint>>,
    /// Table row indices for the preview; empty unless enabled.
    pub preview: Vec<usize>,
}

/// One full pass over the loaded table for the current controls.
pub fn evaluate(table: Arc<ListingTable>, controls: &Controls, config: &DashboardConfig) -> Snapshot {
    let total_rows = table.len();
    let view = apply(table, &controls.criteria);
    let summary = summarize(&view);
    let histogram = odometer_histogram(&view, config.bins.clamp(controls.bins));
    let scatter = scatter_pairs(&view);
    let preview = if controls.show_table {
        view.indices().iter().take(config.preview_rows).copied().collect()
    } else {
        Vec::new()
    };

    log::debug!(
        "Pipeline run: {} of {} rows, {} scatter points",
        view.len(),
        total_rows,
        scatter.as_ref().map_or(0, Vec::len)
    );

    Snapshot {
        total_rows,
        view,
        summary,
        histogram,
        scatter,
        preview,
    }
}
