use serde::Serialize;

use crate::color::Rgb;
use crate::data::aggregate::{Coordinate, LocationSummary};

pub const MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v11";
pub const ZOOM: f64 = 14.0;
pub const PITCH: f64 = 50.0;
/// Hexagon radius in map units (meters).
pub const HEX_RADIUS: f64 = 50.0;
pub const ELEVATION_SCALE: f64 = 4.0;
pub const ELEVATION_RANGE: [f64; 2] = [0.0, 1000.0];
/// Count at which the fill colour is fully red.
pub const SATURATION_COUNT: f64 = 100.0;
pub const TOOLTIP: &str = "Trash Locations: {count}";

/// Initial camera of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

/// One extruded hexagon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCell {
    pub position: Coordinate,
    pub count: usize,
    pub elevation: f64,
    pub fill_color: Rgb,
    /// [`TOOLTIP`] with the count filled in.
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexagonLayer {
    pub radius: f64,
    pub extruded: bool,
    pub pickable: bool,
    pub auto_highlight: bool,
    pub elevation_scale: f64,
    pub elevation_range: [f64; 2],
    pub line_color: Rgb,
    pub tooltip: String,
    pub cells: Vec<DensityCell>,
}

/// Density map of pickup locations, centred on the view's centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensitySpec {
    pub map_style: String,
    pub view_state: ViewState,
    pub layer: HexagonLayer,
}

/// Yellow for a single pickup, shading to red at [`SATURATION_COUNT`].
pub fn fill_color(count: usize) -> Rgb {
    let green = ((1.0 - count as f64 / SATURATION_COUNT) * 255.0).clamp(0.0, 255.0);
    Rgb::new(255, green as u8, 0)
}

/// Extrusion height for a cell, clamped to [`ELEVATION_RANGE`].
pub fn elevation(count: usize) -> f64 {
    let [lo, hi] = ELEVATION_RANGE;
    (count as f64 * ELEVATION_SCALE).clamp(lo, hi)
}

pub fn build_density(summary: &LocationSummary) -> DensitySpec {
    let cells = summary
        .buckets
        .iter()
        .map(|b| DensityCell {
            position: b.position,
            count: b.count,
            elevation: elevation(b.count),
            fill_color: fill_color(b.count),
            tooltip: TOOLTIP.replace("{count}", &b.count.to_string()),
        })
        .collect();

    DensitySpec {
        map_style: MAP_STYLE.to_string(),
        view_state: ViewState {
            latitude: summary.centroid.y,
            longitude: summary.centroid.x,
            zoom: ZOOM,
            pitch: PITCH,
        },
        layer: HexagonLayer {
            radius: HEX_RADIUS,
            extruded: true,
            pickable: true,
            auto_highlight: true,
            elevation_scale: ELEVATION_SCALE,
            elevation_range: ELEVATION_RANGE,
            line_color: Rgb::BLACK,
            tooltip: TOOLTIP.to_string(),
            cells,
        },
    }
}
