use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Record – one row of the pickup dataset
// ---------------------------------------------------------------------------

/// A single trash-pickup entry (one row of the source table).
///
/// Field names match the column headers of the city export so the CSV and
/// JSON loaders can deserialize rows directly; unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Street address identifier. Integer ids are kept as text.
    #[serde(deserialize_with = "address_id")]
    pub sam_address_id: String,
    /// Full street address, e.g. `"10 A St"`.
    pub full_address: String,
    /// Neighborhood used for mail delivery.
    pub mailing_neighborhood: String,
    /// Pickup day code, e.g. `"M"`, `"TF"` or `"Monday"`.
    pub trashday: String,
    /// Longitude.
    pub x_coord: f64,
    /// Latitude.
    pub y_coord: f64,
}

/// Accept both `"123"` and `123` for the address id.
fn address_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Integer(i) => i.to_string(),
        RawId::Float(f) => float_id(f),
        RawId::Text(s) => s,
    })
}

/// Text form of a numeric id: whole numbers drop the trailing `.0`.
pub(crate) fn float_id(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.full_address, self.mailing_neighborhood, self.trashday
        )
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once built: there are no mutating
/// accessors, derived collections borrow from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    /// Distinct neighborhoods in the order they first appear.
    neighborhoods: Vec<String>,
    /// Distinct pickup day codes, sorted.
    trashdays: Vec<String>,
}

impl Dataset {
    /// Build the dataset and its neighborhood index from loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut neighborhoods = Vec::new();
        let mut days: BTreeSet<&str> = BTreeSet::new();
        for rec in &records {
            if seen.insert(rec.mailing_neighborhood.as_str()) {
                neighborhoods.push(rec.mailing_neighborhood.clone());
            }
            days.insert(rec.trashday.as_str());
        }
        let trashdays = days.into_iter().map(str::to_string).collect();
        Dataset {
            records,
            neighborhoods,
            trashdays,
        }
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct neighborhoods, first-appearance order.
    pub fn neighborhoods(&self) -> &[String] {
        &self.neighborhoods
    }

    /// Distinct pickup day codes across the whole dataset, sorted.
    pub fn trashdays(&self) -> &[String] {
        &self.trashdays
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
