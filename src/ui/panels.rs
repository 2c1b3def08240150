use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::pipeline::Dashboard;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar: neighborhood selector and street search.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Trash Schedule Options");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state afterwards.
    let neighborhoods = dataset.neighborhoods().to_vec();
    let current = state.criteria.neighborhood.clone();
    let mut picked: Option<String> = None;

    ui.strong("Select your preferred neighborhood");
    egui::ComboBox::from_id_salt("neighborhood")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for name in &neighborhoods {
                if ui.selectable_label(current == *name, name).clicked() {
                    picked = Some(name.clone());
                }
            }
        });
    if let Some(name) = picked {
        state.set_neighborhood(&name);
    }

    ui.add_space(8.0);
    ui.strong("Enter the street name (e.g., A St)");
    let mut street = state.criteria.street.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut street).hint_text("any street"))
        .changed()
    {
        state.set_street(&street);
    }
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
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export charts…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown = state
                .dashboard
                .as_ref()
                .and_then(Dashboard::charts)
                .map_or(0, |c| c.rows);
            ui.label(format!("{} pickups loaded, {} shown", ds.len(), shown));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open trash pickup data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(dashboard) = &state.dashboard else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export chart specifications")
        .add_filter("JSON", &["json"])
        .set_file_name("dashboard.json")
        .save_file();

    if let Some(path) = file {
        match export_dashboard(dashboard, &path) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write the dashboard (criteria and all four chart specs) as pretty JSON.
pub fn export_dashboard(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dashboard).context("writing dashboard JSON")?;
    writer.flush().context("flushing dashboard JSON")?;
    Ok(())
}
