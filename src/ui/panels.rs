use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Column;
use crate::pipeline::Controls;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar controls. Edits go to a copy of the controls which is
/// handed back to the state once per frame.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut controls = state.controls.clone();
    let config = &state.config;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (column, title) in [(Column::Condition, "Vehicle condition"), (Column::Type, "Type")] {
                if !table.schema.has(column) {
                    continue;
                }
                let all_values: Vec<&str> = table.category_values(column).collect();
                category_filter(ui, &mut controls, column, title, &all_values);
            }

            if let Some(range) = controls.criteria.odometer.as_mut() {
                ui.separator();
                ui.strong("Odometer range");
                let upper = table
                    .max_of(Column::Odometer)
                    .filter(|max| *max > 0.0)
                    .unwrap_or(1.0);
                let lower = table
                    .min_of(Column::Odometer)
                    .unwrap_or(0.0)
                    .min(0.0);
                ui.add(
                    egui::Slider::new(&mut range.min, lower..=upper)
                        .step_by(config.odometer_step)
                        .text("min"),
                );
                ui.add(
                    egui::Slider::new(&mut range.max, lower..=upper)
                        .step_by(config.odometer_step)
                        .text("max"),
                );
                if range.min > range.max {
                    range.max = range.min;
                }
            }

            ui.separator();
            ui.add(
                egui::Slider::new(&mut controls.bins, config.bins.min..=config.bins.max)
                    .step_by(config.bins.step as f64)
                    .text("Histogram bins"),
            );
            ui.checkbox(&mut controls.log_price, "Log price scale (scatter)");
            ui.checkbox(&mut controls.show_table, "Show first rows");
        });

    state.update_controls(controls);
}

/// Checkbox group for one categorical column.
fn category_filter(
    ui: &mut Ui,
    controls: &mut Controls,
    column: Column,
    title: &str,
    all_values: &[&str],
) {
    let Some(selected) = controls.criteria.selected_mut(column) else {
        return;
    };

    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.name())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(all_values.iter().map(|v| v.to_string()));
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            for &value in all_values {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value).changed() {
                    if checked {
                        selected.insert(value.to_string());
                    } else {
                        selected.remove(value);
                    }
                }
            }

            if selected.is_empty() {
                ui.label(RichText::new("Nothing selected: no constraint").weak());
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.cache.is_empty(), egui::Button::new("Reload all"))
                .clicked()
            {
                state.reload_all();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(snapshot) = &state.snapshot {
            ui.label(format!(
                "Loaded: {} rows  •  Filtered: {} rows",
                snapshot.total_rows,
                snapshot.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
