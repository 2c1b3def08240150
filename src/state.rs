use std::path::Path;

use crate::data::filter::FilterCriteria;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::pipeline::{self, Dashboard};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<Dataset>,

    /// Current sidebar selection.
    pub criteria: FilterCriteria,

    /// Pipeline output for `criteria` (cached until the selection changes).
    pub dashboard: Option<Dashboard>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset, select its first neighborhood and
    /// clear the street filter.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let first = dataset.neighborhoods().first().cloned().unwrap_or_default();
        self.criteria = FilterCriteria::new(first, "");
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Load `path` and make it the current dataset. Failures end up in
    /// `status_message`; the previous dataset is kept.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} pickups in {} neighborhoods from {}",
                    dataset.len(),
                    dataset.neighborhoods().len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-run the pipeline for the current criteria.
    pub fn refresh(&mut self) {
        self.dashboard = self
            .dataset
            .as_ref()
            .map(|ds| pipeline::run(ds, &self.criteria));
    }

    pub fn set_neighborhood(&mut self, neighborhood: &str) {
        if self.criteria.neighborhood != neighborhood {
            self.criteria.neighborhood = neighborhood.to_string();
            self.refresh();
        }
    }

    pub fn set_street(&mut self, street: &str) {
        if self.criteria.street != street {
            self.criteria.street = street.to_string();
            self.refresh();
        }
    }
}
