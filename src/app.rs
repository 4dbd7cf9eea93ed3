use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::{metrics, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ListingLensApp {
    pub state: AppState,
}

impl ListingLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ListingLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Used-vehicle listings");

    let Some(snapshot) = &state.snapshot else {
        // A failed load halts the run: nothing but the error is shown.
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.label(RichText::new(msg).color(Color32::RED).heading());
            }
            None => {
                ui.heading("Open a listings file to begin  (File → Open…)");
            }
        });
        return;
    };

    metrics::metrics_row(ui, &snapshot.summary);
    ui.label(RichText::new("Use the sidebar to filter and tune the charts.").weak());
    ui.separator();

    let preview = snapshot.preview.clone();
    let listings = state.table.clone();

    let chart_height = if state.controls.show_table {
        ui.available_height() * 0.55
    } else {
        ui.available_height()
    };
    ui.allocate_ui(egui::vec2(ui.available_width(), chart_height), |ui: &mut Ui| {
        plot::charts(ui, state);
    });

    if state.controls.show_table {
        ui.separator();
        match listings {
            Some(listings) if !preview.is_empty() => {
                table::preview_table(ui, &listings, &preview);
            }
            _ => {
                ui.label("No rows to preview.");
            }
        }
    }
}
