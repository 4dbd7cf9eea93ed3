use eframe::egui::Ui;
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::ListingTable;

/// Render the first rows of the filtered view as a table.
pub fn preview_table(ui: &mut Ui, table: &ListingTable, rows: &[usize]) {
    ui.strong("First rows of the filtered dataset");

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .columns(TableColumn::auto().at_least(60.0), table.column_names.len())
        .header(20.0, |mut header| {
            for name in &table.column_names {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let listing = &table.rows[rows[row.index()]];
                for name in &table.column_names {
                    row.col(|ui| {
                        ui.label(listing.get(name).to_string());
                    });
                }
            });
        });
}
