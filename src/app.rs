use std::path::Path;

use eframe::egui::{self, Color32};

use crate::state::AppState;
use crate::ui::{panels, plot};

/// Loaded automatically at startup when present in the working directory.
pub const DEFAULT_DATASET: &str = "trash.csv";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TrashdayApp {
    pub state: AppState,
}

impl TrashdayApp {
    /// Start the app, loading [`DEFAULT_DATASET`] if it exists.
    pub fn new() -> Self {
        let mut app = Self::default();
        let path = Path::new(DEFAULT_DATASET);
        if path.exists() {
            app.state.load_path(path);
        } else {
            log::warn!("{DEFAULT_DATASET} not found, waiting for File → Open…");
        }
        app
    }
}

impl eframe::App for TrashdayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: neighborhood / street ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state);
        });
    }
}

/// Dark theme with the green accent of the city dashboard.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    let accent = Color32::from_rgb(0x5a, 0xcb, 0x6b);
    visuals.selection.bg_fill = accent;
    visuals.hyperlink_color = accent;
    visuals.panel_fill = Color32::from_rgb(0x18, 0x18, 0x18);
    visuals.override_text_color = Some(Color32::from_rgb(0xf0, 0xf1, 0xf3));
    ctx.set_visuals(visuals);
}
