use serde::Serialize;

use crate::color::{ColorMap, Rgb};
use crate::data::aggregate::Tally;

pub const BAR_TITLE: &str = "Frequency of Trash Pick Ups by Neighborhood";
pub const BAR_X_TITLE: &str = "Neighborhood";
pub const BAR_Y_TITLE: &str = "Count of Trash Pick Ups";
pub const PIE_TITLE: &str = "Distribution of Trash Days";

// ---------------------------------------------------------------------------
// Bar chart: pickups per neighborhood (whole dataset)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<String>,
    pub y: Vec<usize>,
}

pub fn build_bar(per_neighborhood: &Tally) -> BarSpec {
    BarSpec {
        title: BAR_TITLE.to_string(),
        x_title: BAR_X_TITLE.to_string(),
        y_title: BAR_Y_TITLE.to_string(),
        x: per_neighborhood.keys().map(str::to_string).collect(),
        y: per_neighborhood.counts().collect(),
    }
}

// ---------------------------------------------------------------------------
// Pie chart: share of each pickup day (filtered view)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub colors: Vec<Rgb>,
}

impl PieSpec {
    /// Fraction of the whole for each slice, in label order.
    pub fn fractions(&self) -> Vec<f64> {
        let total: usize = self.values.iter().sum();
        if total == 0 {
            return vec![0.0; self.values.len()];
        }
        self.values
            .iter()
            .map(|&v| v as f64 / total as f64)
            .collect()
    }
}

pub fn build_pie(per_day: &Tally, colors: &ColorMap) -> PieSpec {
    PieSpec {
        title: PIE_TITLE.to_string(),
        labels: per_day.keys().map(str::to_string).collect(),
        values: per_day.counts().collect(),
        colors: per_day.keys().map(|day| colors.color_for(day)).collect(),
    }
}
