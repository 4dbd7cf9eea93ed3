use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::ColorMap;
use crate::data::histogram::Histogram;
use crate::data::model::Column;
use crate::data::scatter::ScatterPoint;
use crate::state::{AppState, ChartTab};
use crate::ui::metrics::thousands;

// ---------------------------------------------------------------------------
// Chart tabs (central panel)
// ---------------------------------------------------------------------------

/// Render the tab strip and the selected chart.
pub fn charts(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, ChartTab::Histogram, "Histogram (odometer)");
        ui.selectable_value(
            &mut state.active_tab,
            ChartTab::Scatter,
            "Scatter (odometer vs price)",
        );
    });
    ui.separator();

    let Some(snapshot) = &state.snapshot else {
        return;
    };

    match state.active_tab {
        ChartTab::Histogram => match &snapshot.histogram {
            Some(histogram) => odometer_histogram(ui, histogram),
            None if snapshot.view.is_empty() => {
                ui.label("No listings match the current filters.");
            }
            None if snapshot.view.has(Column::Odometer) => {
                ui.label("No odometer values match the current filters.");
            }
            None => {
                ui.label("The dataset has no `odometer` column.");
            }
        },
        ChartTab::Scatter => match &snapshot.scatter {
            Some(points) => scatter(ui, points, state.color_map.as_ref(), state.controls.log_price),
            None => {
                ui.label("The `odometer` and `price` columns are needed for the scatter plot.");
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn odometer_histogram(ui: &mut Ui, histogram: &Histogram) {
    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width() * 0.98)
                .name(format!("{:.0} – {:.0}", bin.start, bin.end))
        })
        .collect();

    Plot::new("odometer_histogram")
        .x_axis_label("Odometer")
        .y_axis_label("Frequency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(Color32::LIGHT_BLUE)
                    .name(format!("odometer ({} listings)", histogram.total())),
            );
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

fn scatter(ui: &mut Ui, points: &[ScatterPoint], color_map: Option<&ColorMap>, log_price: bool) {
    if points.is_empty() {
        ui.label("No listings match the current filters.");
        return;
    }

    // One series per condition so the legend doubles as a colour key.
    let mut groups: BTreeMap<Option<&str>, Vec<[f64; 2]>> = BTreeMap::new();
    for point in points {
        let Some(y) = price_axis_value(point.price, log_price) else {
            continue;
        };
        groups
            .entry(point.condition.as_deref())
            .or_default()
            .push([point.odometer, y]);
    }

    let mut plot = Plot::new("odometer_vs_price")
        .legend(Legend::default())
        .x_axis_label("Odometer")
        .y_axis_label(if log_price { "Price (log)" } else { "Price" })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if log_price {
        plot = plot.y_axis_formatter(|mark, _range| {
            format!("${}", thousands(10f64.powf(mark.value).round() as i64))
        });
    }

    plot.show(ui, |plot_ui| {
        for (condition, series) in groups {
            let color = color_map
                .map(|cm| cm.color_for(condition))
                .unwrap_or(Color32::LIGHT_BLUE)
                .gamma_multiply(0.6);
            plot_ui.points(
                Points::new(series)
                    .name(condition.unwrap_or("unknown"))
                    .color(color)
                    .radius(2.0),
            );
        }
    });
}

/// Y coordinate for a price. On the log axis non-positive prices cannot be
/// drawn and are skipped.
fn price_axis_value(price: f64, log_price: bool) -> Option<f64> {
    if !log_price {
        Some(price)
    } else if price > 0.0 {
        Some(price.log10())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_axis_skips_non_positive_prices() {
        let y = price_axis_value(1000.0, true).expect("positive price");
        assert!((y - 3.0).abs() < 1e-12);
        assert_eq!(price_axis_value(0.0, true), None);
        assert_eq!(price_axis_value(0.0, false), Some(0.0));
    }
}
