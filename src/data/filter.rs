use serde::Serialize;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: neighborhood + street
// ---------------------------------------------------------------------------

/// User selection driving the filter.
///
/// `neighborhood` is compared for exact, case-sensitive equality.
/// `street` is a case-insensitive substring of the full address; an empty
/// string disables the street filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub neighborhood: String,
    pub street: String,
}

impl FilterCriteria {
    pub fn new(neighborhood: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            neighborhood: neighborhood.into(),
            street: street.into(),
        }
    }

    /// Whether a single record passes both predicates.
    pub fn matches(&self, record: &Record) -> bool {
        record.mailing_neighborhood == self.neighborhood
            && contains_ignore_case(&record.full_address, &self.street)
    }
}

/// Case-insensitive substring test; an empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Return indices of records that pass the criteria, in dataset order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – order-preserving subset of a dataset
// ---------------------------------------------------------------------------

/// Records of a [`Dataset`] that matched a [`FilterCriteria`].
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Wrap a precomputed index list. Indices must be valid for `dataset`.
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < dataset.len()));
        Self { dataset, indices }
    }

    /// Positions of the matching records within the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the matching records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

/// Apply `criteria` to `dataset` in a single pass.
///
/// An unknown neighborhood simply produces an empty view.
pub fn filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::from_indices(dataset, filtered_indices(dataset, criteria))
}
