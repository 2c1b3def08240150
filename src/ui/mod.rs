//! egui rendering of the dashboard state.

pub mod panels;
pub mod plot;
pub mod table;

use eframe::egui::Color32;

use crate::color::Rgb;

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.r(), c.g(), c.b())
    }
}
