use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use crate::charts::{BarSpec, DensitySpec, PieSpec, ScatterSpec};
use crate::pipeline::{Dashboard, NO_DATA_MESSAGE};
use crate::state::AppState;
use crate::ui::table;

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the data grid and the four charts for the current selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(dashboard)) = (&state.dataset, &state.dashboard) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a pickup dataset to begin  (File → Open…)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Trash Schedule of Boston Neighborhoods");
            ui.label("Welcome! This app displays the trash pickup schedule of neighborhoods in Boston");
            ui.add_space(8.0);

            let charts = match dashboard {
                Dashboard::NoData { .. } => {
                    ui.label(RichText::new(NO_DATA_MESSAGE).italics());
                    return;
                }
                Dashboard::Ready(charts) => charts,
            };

            ui.heading(format!(
                "Data of {} Neighborhood and {} Street",
                charts.criteria.neighborhood, charts.criteria.street
            ));
            table::records_table(ui, dataset, &charts.indices);

            ui.separator();
            ui.heading("Density of Trash Pick Up");
            density_map(ui, &charts.density);

            ui.separator();
            ui.heading("Trash Pick Up Day by Street Name");
            scatter_plot(ui, &charts.scatter);

            ui.separator();
            ui.heading("Frequency of Trash Pick Ups by Neighborhood");
            bar_chart(ui, &charts.bar);

            ui.separator();
            ui.heading("Distribution of Trash Days");
            pie_chart(ui, &charts.pie);
        });
}

/// Axis formatter that shows `labels[i]` at integer marks and nothing else.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || v.fract().abs() > f64::EPSILON {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Density map
// ---------------------------------------------------------------------------

/// Top-down view of the hexagon layer: one marker per location bucket,
/// sized by elevation and coloured by the count ramp.
fn density_map(ui: &mut Ui, spec: &DensitySpec) {
    let layer = &spec.layer;
    let [_, max_elevation] = layer.elevation_range;
    let lat_scale = spec.view_state.latitude.to_radians().cos();

    ui.label(format!(
        "Centre {:.5}, {:.5}  ·  zoom {}  ·  pitch {}°",
        spec.view_state.latitude,
        spec.view_state.longitude,
        spec.view_state.zoom,
        spec.view_state.pitch
    ));

    Plot::new("density_map")
        .height(PLOT_HEIGHT)
        .data_aspect(if lat_scale > 0.0 { (1.0 / lat_scale) as f32 } else { 1.0 })
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            for cell in &layer.cells {
                let radius = 3.0 + 9.0 * (cell.elevation / max_elevation) as f32;
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[cell.position.x, cell.position.y]]))
                        .name(&cell.tooltip)
                        .radius(radius)
                        .filled(true)
                        .color(Color32::from(cell.fill_color)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Categorical scatter: addresses along x, one row per pickup day.
fn scatter_plot(ui: &mut Ui, spec: &ScatterSpec) {
    let days: Vec<String> = spec.series.iter().map(|s| s.name.clone()).collect();

    Plot::new("scatter_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_title.as_str())
        .y_axis_label(spec.y_title.as_str())
        .x_axis_formatter(category_formatter(spec.categories.clone()))
        .y_axis_formatter(category_formatter(days))
        .show(ui, |plot_ui| {
            for (row, series) in spec.series.iter().enumerate() {
                let points: PlotPoints = series
                    .columns
                    .iter()
                    .map(|&col| [col as f64, row as f64])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .radius(series.marker_size / 2.0)
                        .filled(true)
                        .color(Color32::from(series.color)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, spec: &BarSpec) {
    let bars: Vec<Bar> = spec
        .x
        .iter()
        .zip(&spec.y)
        .enumerate()
        .map(|(i, (name, &count))| Bar::new(i as f64, count as f64).name(name).width(0.7))
        .collect();

    Plot::new("bar_chart")
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.x_title.as_str())
        .y_axis_label(spec.y_title.as_str())
        .x_axis_formatter(category_formatter(spec.x.clone()))
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(&spec.title)
                    .color(Color32::from_rgb(0x5a, 0xcb, 0x6b)),
            );
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// egui_plot has no pie chart; draw the wedges as triangle fans.
fn pie_chart(ui: &mut Ui, spec: &PieSpec) {
    let fractions = spec.fractions();

    ui.horizontal(|ui: &mut Ui| {
        let size = PLOT_HEIGHT.min(ui.available_width() * 0.5);
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        let mut start = -TAU / 4.0;
        for (fraction, color) in fractions.iter().zip(&spec.colors) {
            let sweep = *fraction as f32 * TAU;
            let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as usize;
            let fill = Color32::from(*color);
            for step in 0..steps {
                let a0 = start + sweep * step as f32 / steps as f32;
                let a1 = start + sweep * (step + 1) as f32 / steps as f32;
                let p0 = center + radius * egui::vec2(a0.cos(), a0.sin());
                let p1 = center + radius * egui::vec2(a1.cos(), a1.sin());
                painter.add(Shape::convex_polygon(vec![center, p0, p1], fill, Stroke::NONE));
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for ((label, value), (fraction, color)) in spec
                .labels
                .iter()
                .zip(&spec.values)
                .zip(fractions.iter().zip(&spec.colors))
            {
                ui.label(
                    RichText::new(format!("■ {label}: {value} ({:.1}%)", fraction * 100.0))
                        .color(Color32::from(*color)),
                );
            }
        });
    });
}
