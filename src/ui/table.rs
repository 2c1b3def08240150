use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;

const ROW_HEIGHT: f32 = 18.0;
const HEADERS: [&str; 6] = [
    "sam_address_id",
    "full_address",
    "mailing_neighborhood",
    "trashday",
    "x_coord",
    "y_coord",
];

/// Grid of the filtered records, one row per dataset index.
pub fn records_table(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    let records = dataset.records();

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(260.0)
        .column(Column::auto())
        .column(Column::initial(220.0).resizable(true))
        .column(Column::auto().resizable(true))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                let Some(rec) = indices.get(row.index()).and_then(|&i| records.get(i)) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(&rec.sam_address_id);
                });
                row.col(|ui| {
                    ui.label(&rec.full_address).on_hover_text(rec.to_string());
                });
                row.col(|ui| {
                    ui.label(&rec.mailing_neighborhood);
                });
                row.col(|ui| {
                    ui.label(&rec.trashday);
                });
                row.col(|ui| {
                    ui.label(format!("{:.6}", rec.x_coord));
                });
                row.col(|ui| {
                    ui.label(format!("{:.6}", rec.y_coord));
                });
            });
        });
}
