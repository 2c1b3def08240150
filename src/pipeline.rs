use serde::Serialize;

use crate::charts::{
    build_bar, build_density, build_pie, build_scatter, BarSpec, DensitySpec, PieSpec,
    ScatterSpec,
};
use crate::color::ColorMap;
use crate::data::aggregate::{
    aggregate_locations, count_by_day, count_by_neighborhood, group_by_day,
};
use crate::data::filter::{filter, FilterCriteria};
use crate::data::model::Dataset;

/// Shown instead of the charts when the filter matches nothing.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected neighborhood and street.";

// ---------------------------------------------------------------------------
// Dashboard – everything the shell renders for one interaction
// ---------------------------------------------------------------------------

/// The four chart specs plus the rows they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub criteria: FilterCriteria,
    /// Dataset positions of the filtered rows, for the data grid.
    #[serde(skip)]
    pub indices: Vec<usize>,
    pub rows: usize,
    pub density: DensitySpec,
    pub scatter: ScatterSpec,
    /// Computed over the whole dataset, not the filtered rows.
    pub bar: BarSpec,
    pub pie: PieSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Dashboard {
    /// Nothing matched; no aggregation or chart building was done.
    NoData { criteria: FilterCriteria },
    Ready(Box<Charts>),
}

impl Dashboard {
    pub fn criteria(&self) -> &FilterCriteria {
        match self {
            Dashboard::NoData { criteria } => criteria,
            Dashboard::Ready(charts) => &charts.criteria,
        }
    }

    pub fn charts(&self) -> Option<&Charts> {
        match self {
            Dashboard::NoData { .. } => None,
            Dashboard::Ready(charts) => Some(&**charts),
        }
    }
}

/// Run filter → aggregate → build for one set of criteria.
///
/// The empty-view check happens before any aggregation: the location
/// centroid is undefined over zero records.
pub fn run(dataset: &Dataset, criteria: &FilterCriteria) -> Dashboard {
    let view = filter(dataset, criteria);
    log::debug!(
        "filter {:?} / {:?}: {} of {} rows",
        criteria.neighborhood,
        criteria.street,
        view.len(),
        dataset.len()
    );

    if view.is_empty() {
        return Dashboard::NoData {
            criteria: criteria.clone(),
        };
    }
    let Some(locations) = aggregate_locations(view.iter()) else {
        return Dashboard::NoData {
            criteria: criteria.clone(),
        };
    };

    let colors = ColorMap::new(dataset.trashdays().iter().map(String::as_str));

    let density = build_density(&locations);
    let scatter = build_scatter(&group_by_day(view.iter()), &colors);
    let bar = build_bar(&count_by_neighborhood(dataset.records()));
    let pie = build_pie(&count_by_day(view.iter()), &colors);

    Dashboard::Ready(Box::new(Charts {
        criteria: criteria.clone(),
        indices: view.indices().to_vec(),
        rows: view.len(),
        density,
        scatter,
        bar,
        pie,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, three_records};

    #[test]
    fn unknown_neighborhood_short_circuits() {
        let ds = three_records();
        let dash = run(&ds, &FilterCriteria::new("Cambridge", ""));
        assert_eq!(
            dash,
            Dashboard::NoData {
                criteria: FilterCriteria::new("Cambridge", "")
            }
        );
        assert!(dash.charts().is_none());
    }

    #[test]
    fn street_with_no_match_short_circuits() {
        let ds = three_records();
        let dash = run(&ds, &FilterCriteria::new("Allston", "zzz"));
        assert!(matches!(dash, Dashboard::NoData { .. }));
        assert_eq!(dash.criteria().street, "zzz");
    }

    #[test]
    fn filtered_charts_for_example_dataset() {
        let ds = three_records();
        let dash = run(&ds, &FilterCriteria::new("Allston", "a st"));
        let charts = dash.charts().unwrap();

        assert_eq!(charts.indices, [0]);
        assert_eq!(charts.rows, 1);
        assert_eq!(charts.density.view_state.longitude, -71.13);
        assert_eq!(charts.density.layer.cells.len(), 1);
        assert_eq!(charts.scatter.series.len(), 1);
        assert_eq!(charts.scatter.series[0].x, ["10 A St"]);
        assert_eq!(charts.pie.labels, ["Monday"]);
        assert_eq!(charts.pie.values, [1]);
    }

    #[test]
    fn bar_chart_ignores_the_filter() {
        let ds = three_records();
        let dash = run(&ds, &FilterCriteria::new("Brighton", ""));
        let charts = dash.charts().unwrap();

        // Only one Brighton row is shown, but the bar still counts every
        // neighborhood in the dataset.
        assert_eq!(charts.rows, 1);
        assert_eq!(charts.bar.x, ["Allston", "Brighton"]);
        assert_eq!(charts.bar.y, [2, 1]);
        assert_eq!(charts.bar.y.iter().sum::<usize>(), ds.len());
        assert_eq!(charts.pie.values.iter().sum::<usize>(), charts.rows);
    }

    #[test]
    fn same_input_same_output() {
        let ds = Dataset::from_records(vec![
            record("Allston", "1 A St", "T", -71.0, 42.0),
            record("Allston", "2 A St", "M", -71.1, 42.1),
            record("Allston", "3 A St", "T", -71.0, 42.0),
        ]);
        let criteria = FilterCriteria::new("Allston", "");
        assert_eq!(run(&ds, &criteria), run(&ds, &criteria));
    }

    #[test]
    fn day_colors_agree_between_scatter_and_pie() {
        let ds = Dataset::from_records(vec![
            record("Allston", "1 A St", "T", -71.0, 42.0),
            record("Allston", "2 A St", "M", -71.1, 42.1),
            record("Allston", "3 A St", "M", -71.0, 42.0),
        ]);
        let dash = run(&ds, &FilterCriteria::new("Allston", ""));
        let charts = dash.charts().unwrap();
        for series in &charts.scatter.series {
            let slice = charts.pie.labels.iter().position(|l| *l == series.name).unwrap();
            assert_eq!(charts.pie.colors[slice], series.color);
        }
    }

    #[test]
    fn export_is_tagged_json() {
        let ds = three_records();
        let json = serde_json::to_value(run(&ds, &FilterCriteria::new("Cambridge", ""))).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["criteria"]["neighborhood"], "Cambridge");

        let json = serde_json::to_value(run(&ds, &FilterCriteria::new("Allston", ""))).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["density"]["view_state"]["zoom"], 14.0);
        assert!(json.get("indices").is_none());
    }
}
