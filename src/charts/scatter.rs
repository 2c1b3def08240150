use std::collections::HashMap;

use serde::Serialize;

use crate::color::{ColorMap, Rgb};
use crate::data::aggregate::DayGroups;

pub const TITLE: &str = "Scatterplot: Trash Pick Up Day by Street Name";
pub const X_TITLE: &str = "Street Name";
pub const Y_TITLE: &str = "Trash Pick Up Day";
pub const X_TICK_ANGLE: f64 = -45.0;
pub const MARKER_SIZE: f32 = 10.0;

/// Points for one pickup day: every address on that day plotted at the
/// day's label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub mode: String,
    pub marker_size: f32,
    pub color: Rgb,
    /// Position of each `x` entry in [`ScatterSpec::categories`].
    #[serde(skip)]
    pub columns: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x_tick_angle: f64,
    /// Distinct addresses across all series, in first-appearance order.
    pub categories: Vec<String>,
    pub series: Vec<ScatterSeries>,
}

/// One series per day, in the groups' order.
pub fn build_scatter(groups: &DayGroups<'_>, colors: &ColorMap) -> ScatterSpec {
    let mut column_of: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<String> = Vec::new();

    let series = groups
        .iter()
        .map(|(day, records)| {
            let columns = records
                .iter()
                .map(|r| {
                    *column_of.entry(r.full_address.as_str()).or_insert_with(|| {
                        categories.push(r.full_address.clone());
                        categories.len() - 1
                    })
                })
                .collect();
            ScatterSeries {
                name: day.to_string(),
                x: records.iter().map(|r| r.full_address.clone()).collect(),
                y: vec![day.to_string(); records.len()],
                mode: "markers".to_string(),
                marker_size: MARKER_SIZE,
                color: colors.color_for(day),
                columns,
            }
        })
        .collect();

    ScatterSpec {
        title: TITLE.to_string(),
        x_title: X_TITLE.to_string(),
        y_title: Y_TITLE.to_string(),
        x_tick_angle: X_TICK_ANGLE,
        categories,
        series,
    }
}
