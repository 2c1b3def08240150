//! Chart specifications: renderer-agnostic descriptions of the four
//! dashboard visualizations, built from filter/aggregate results.
//!
//! ```text
//!   LocationSummary ──► density  ──► DensitySpec  (hexagon map layer)
//!   DayGroups       ──► scatter  ──► ScatterSpec  (one series per day)
//!   Tally (global)  ──► summary  ──► BarSpec      (pickups per neighborhood)
//!   Tally (view)    ──► summary  ──► PieSpec      (pickup-day shares)
//! ```
//!
//! Every spec derives `Serialize` so the shell can export it as JSON.

pub mod density;
pub mod scatter;
pub mod summary;

pub use density::{build_density, DensitySpec};
pub use scatter::{build_scatter, ScatterSpec};
pub use summary::{build_bar, build_pie, BarSpec, PieSpec};
