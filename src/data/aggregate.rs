use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::Record;

// ---------------------------------------------------------------------------
// Tally – key → count with a fixed presentation order
// ---------------------------------------------------------------------------

/// Counts per distinct key. Keys are unique and the counts sum to the size
/// of the collection the tally was computed over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, c)| *c)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts().sum()
    }
}

/// Count keys in first-appearance order.
fn tally_in_order<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match slot.get(key) {
            Some(&i) => entries[i].1 += 1,
            None => {
                slot.insert(key, entries.len());
                entries.push((key.to_string(), 1));
            }
        }
    }
    entries
}

// ---------------------------------------------------------------------------
// Neighborhood / day aggregations
// ---------------------------------------------------------------------------

/// Pickups per neighborhood, keys sorted ascending.
///
/// The bar chart calls this on the whole dataset, not on the filtered view,
/// so it always shows every neighborhood for context.
pub fn count_by_neighborhood<'a>(records: impl IntoIterator<Item = &'a Record>) -> Tally {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.mailing_neighborhood.as_str()).or_default() += 1;
    }
    Tally {
        entries: counts
            .into_iter()
            .map(|(k, c)| (k.to_string(), c))
            .collect(),
    }
}

/// Pickups per day code, most frequent first; ties keep first appearance.
pub fn count_by_day<'a>(records: impl IntoIterator<Item = &'a Record>) -> Tally {
    let mut entries = tally_in_order(records.into_iter().map(|r| r.trashday.as_str()));
    // stable: equal counts stay in first-appearance order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    Tally { entries }
}

/// Records grouped by pickup day, one group per distinct day.
#[derive(Debug, Clone, Default)]
pub struct DayGroups<'a> {
    groups: Vec<(String, Vec<&'a Record>)>,
}

impl<'a> DayGroups<'a> {
    /// Groups in the order their day first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Record])> {
        self.groups.iter().map(|(d, recs)| (d.as_str(), recs.as_slice()))
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(d, _)| d.as_str())
    }
}

pub fn group_by_day<'a>(records: impl IntoIterator<Item = &'a Record>) -> DayGroups<'a> {
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a Record>)> = Vec::new();
    for rec in records {
        let day = rec.trashday.as_str();
        match slot.get(day) {
            Some(&i) => groups[i].1.push(rec),
            None => {
                slot.insert(day, groups.len());
                groups.push((day.to_string(), vec![rec]));
            }
        }
    }
    DayGroups { groups }
}

// ---------------------------------------------------------------------------
// Location buckets (density map)
// ---------------------------------------------------------------------------

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Records sharing one exact coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationBucket {
    pub position: Coordinate,
    pub count: usize,
}

/// Location counts plus the mean position of all counted records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    pub buckets: Vec<LocationBucket>,
    pub centroid: Coordinate,
}

impl LocationSummary {
    /// Number of records the summary was built from.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Bucket records by exact `(x_coord, y_coord)` and compute the centroid.
///
/// Returns `None` for an empty input, where a mean is undefined.
pub fn aggregate_locations<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Option<LocationSummary> {
    let mut slot: HashMap<(u64, u64), usize> = HashMap::new();
    let mut buckets: Vec<LocationBucket> = Vec::new();
    let (mut sum_x, mut sum_y) = (0.0_f64, 0.0_f64);

    for rec in records {
        sum_x += rec.x_coord;
        sum_y += rec.y_coord;

        // -0.0 and 0.0 share a bucket
        let key = (
            (rec.x_coord + 0.0).to_bits(),
            (rec.y_coord + 0.0).to_bits(),
        );
        match slot.get(&key) {
            Some(&i) => buckets[i].count += 1,
            None => {
                slot.insert(key, buckets.len());
                buckets.push(LocationBucket {
                    position: Coordinate {
                        x: rec.x_coord,
                        y: rec.y_coord,
                    },
                    count: 1,
                });
            }
        }
    }

    let n: usize = buckets.iter().map(|b| b.count).sum();
    if n == 0 {
        return None;
    }
    Some(LocationSummary {
        buckets,
        centroid: Coordinate {
            x: sum_x / n as f64,
            y: sum_y / n as f64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterCriteria};
    use crate::data::model::fixtures::{record, three_records};
    use crate::data::model::Dataset;

    fn week() -> Dataset {
        Dataset::from_records(vec![
            record("Allston", "1 A St", "T", -71.0, 42.0),
            record("Allston", "2 A St", "M", -71.0, 42.0),
            record("Roxbury", "3 B St", "T", -71.2, 42.2),
            record("Allston", "4 C St", "W", -71.4, 42.4),
            record("Allston", "5 C St", "M", -71.0, 42.0),
            record("Allston", "6 C St", "M", -71.4, 42.4),
        ])
    }

    #[test]
    fn neighborhood_counts_match_example() {
        let ds = three_records();
        let tally = count_by_neighborhood(ds.records());
        assert_eq!(
            tally.entries(),
            [("Allston".to_string(), 2), ("Brighton".to_string(), 1)]
        );
        assert_eq!(tally.total(), ds.len());
    }

    #[test]
    fn neighborhood_keys_are_sorted() {
        let ds = week();
        let tally = count_by_neighborhood(ds.records());
        assert_eq!(tally.keys().collect::<Vec<_>>(), ["Allston", "Roxbury"]);
        assert_eq!(tally.get("Allston"), Some(5));
        assert_eq!(tally.get("Fenway"), None);
    }

    #[test]
    fn day_counts_sum_to_view_and_rank_by_frequency() {
        let ds = week();
        let view = filter(&ds, &FilterCriteria::new("Allston", ""));
        let tally = count_by_day(view.iter());

        assert_eq!(tally.total(), view.len());
        // M:3, then T and W tie at 1 in first-appearance order
        assert_eq!(tally.keys().collect::<Vec<_>>(), ["M", "T", "W"]);
        assert_eq!(tally.counts().collect::<Vec<_>>(), [3, 1, 1]);
    }

    #[test]
    fn day_groups_follow_first_appearance() {
        let ds = week();
        let groups = group_by_day(ds.records());
        assert_eq!(groups.days().collect::<Vec<_>>(), ["T", "M", "W"]);

        let monday: Vec<&str> = groups
            .iter()
            .find(|(d, _)| *d == "M")
            .map(|(_, recs)| recs.iter().map(|r| r.full_address.as_str()).collect())
            .unwrap();
        assert_eq!(monday, ["2 A St", "5 C St", "6 C St"]);

        let sizes: usize = groups.iter().map(|(_, r)| r.len()).sum();
        assert_eq!(sizes, ds.len());
    }

    #[test]
    fn locations_bucket_identical_coordinates() {
        let ds = week();
        let summary = aggregate_locations(ds.records()).unwrap();

        let counts: Vec<usize> = summary.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, [3, 1, 2]);
        assert_eq!(summary.buckets[0].position, Coordinate { x: -71.0, y: 42.0 });
        assert_eq!(summary.total(), ds.len());

        let mean_x = (-71.0 * 3.0 - 71.2 - 71.4 * 2.0) / 6.0;
        assert!((summary.centroid.x - mean_x).abs() < 1e-9);
    }

    #[test]
    fn locations_of_nothing_is_none() {
        let ds = three_records();
        let view = filter(&ds, &FilterCriteria::new("Cambridge", ""));
        assert!(aggregate_locations(view.iter()).is_none());
    }

    #[test]
    fn empty_inputs_give_empty_tallies() {
        let none: Vec<Record> = Vec::new();
        assert!(count_by_day(&none).entries().is_empty());
        assert!(count_by_neighborhood(&none).entries().is_empty());
        assert_eq!(group_by_day(&none).days().count(), 0);
    }
}
