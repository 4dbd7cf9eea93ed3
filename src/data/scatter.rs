use super::filter::FilteredView;
use super::model::Column;

/// One point of the odometer-vs-price plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub odometer: f64,
    pub price: f64,
    /// Color group; always `None` when the table has no `condition` column.
    pub condition: Option<String>,
}

/// Pair up odometer and price for every row that has both.
///
/// Returns `None` when either column is absent from the table.
pub fn scatter_pairs(view: &FilteredView) -> Option<Vec<ScatterPoint>> {
    if !view.table().schema.has_all(&[Column::Odometer, Column::Price]) {
        return None;
    }
    let with_condition = view.has(Column::Condition);

    let points = view
        .rows()
        .filter_map(|row| {
            Some(ScatterPoint {
                odometer: row.number(Column::Odometer)?,
                price: row.number(Column::Price)?,
                condition: with_condition
                    .then(|| row.text(Column::Condition).map(str::to_string))
                    .flatten(),
            })
        })
        .collect();

    Some(points)
}
