use std::path::Path;

use crate::color::BranchColors;
use crate::config::DashboardConfig;
use crate::data::bulk::{CandidateNames, EmptyCandidates, matched_indices};
use crate::data::filter::{FilterCriteria, Selection, filtered_indices, parse_bound};
use crate::data::loader::{load_candidates_or_empty, load_dataset_or_empty};
use crate::data::model::StudentDataset;
use crate::data::sort::{SortOrder, sorted_indices};
use crate::data::stats::{self, GpaAveraging, Statistics};

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// A displayed subset: indices into the canonical dataset plus its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub indices: Vec<usize>,
    pub statistics: Statistics,
}

impl Default for DerivedView {
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            statistics: Statistics::NoData,
        }
    }
}

impl DerivedView {
    fn from_indices(dataset: &StudentDataset, indices: Vec<usize>, averaging: GpaAveraging) -> Self {
        let statistics = stats::compute(dataset.view(&indices), averaging);
        Self { indices, statistics }
    }
}

/// Everything the dashboard page lets the user choose.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub filters: FilterCriteria,
    pub sort: SortOrder,
    /// Committed name-list search, if any.
    pub names: Option<CandidateNames>,
    pub on_empty_names: EmptyCandidates,
}

/// Everything the bulk search page lets the user choose.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkParams {
    /// `None` until the first search is committed.
    pub candidates: Option<CandidateNames>,
    pub semester: Selection,
    pub on_empty: EmptyCandidates,
}

/// Dashboard reducer: membership → filters → sort, statistics last.
pub fn derive_dashboard_view(
    dataset: &StudentDataset,
    params: &DashboardParams,
    averaging: GpaAveraging,
) -> DerivedView {
    let members = match &params.names {
        Some(names) => matched_indices(dataset, names, params.on_empty_names, &Selection::All),
        None => dataset.all_indices(),
    };
    let filtered = filtered_indices(dataset, &members, &params.filters);
    let sorted = sorted_indices(dataset, &filtered, params.sort);
    DerivedView::from_indices(dataset, sorted, averaging)
}

/// Bulk search reducer: membership AND semester, in dataset order.
pub fn derive_bulk_view(
    dataset: &StudentDataset,
    params: &BulkParams,
    averaging: GpaAveraging,
) -> DerivedView {
    match &params.candidates {
        Some(candidates) => {
            let matched = matched_indices(dataset, candidates, params.on_empty, &params.semester);
            DerivedView::from_indices(dataset, matched, averaging)
        }
        None => DerivedView::default(),
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    BulkSearch,
}

/// The full UI state, independent of rendering. Views are never edited in
/// place; every parameter change re-runs a reducer over the dataset.
pub struct AppState {
    pub config: DashboardConfig,

    /// Canonical dataset (None until a roster load has been attempted).
    pub dataset: Option<StudentDataset>,

    /// Chart colour per branch of the current dataset.
    pub branch_colors: BranchColors,

    pub page: Page,

    pub dashboard: DashboardParams,
    pub dashboard_view: DerivedView,

    pub bulk: BulkParams,
    pub bulk_view: DerivedView,

    /// Raw text of the GPA bound boxes.
    pub gpa_min_text: String,
    pub gpa_max_text: String,

    /// Raw text of the name-list boxes.
    pub dashboard_names_text: String,
    pub bulk_names_text: String,

    /// Status message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            dashboard: DashboardParams {
                filters: FilterCriteria::default(),
                sort: config.default_sort,
                names: None,
                on_empty_names: config.dashboard_empty_names,
            },
            bulk: BulkParams {
                candidates: None,
                semester: Selection::All,
                on_empty: config.bulk_empty_names,
            },
            config,
            dataset: None,
            branch_colors: BranchColors::default(),
            page: Page::Dashboard,
            dashboard_view: DerivedView::default(),
            bulk_view: DerivedView::default(),
            gpa_min_text: String::new(),
            gpa_max_text: String::new(),
            dashboard_names_text: String::new(),
            bulk_names_text: String::new(),
            status_message: None,
        }
    }

    /// Load a roster; failures become an empty dataset.
    pub fn load_source(&mut self, path: &Path) {
        let dataset = load_dataset_or_empty(path);
        self.status_message = dataset
            .is_empty()
            .then(|| format!("No students loaded from {}", path.display()));
        self.set_dataset(dataset);
    }

    /// Replace the canonical dataset. Selections that no longer exist reset
    /// to "All".
    pub fn set_dataset(&mut self, dataset: StudentDataset) {
        reset_missing(&mut self.dashboard.filters.branch, &dataset.branches);
        reset_missing(&mut self.dashboard.filters.semester, &dataset.semesters);
        reset_missing(&mut self.bulk.semester, &dataset.semesters);
        self.branch_colors = BranchColors::new(&dataset.branches);
        self.dataset = Some(dataset);
        self.refresh();
    }

    /// Recompute both views.
    pub fn refresh(&mut self) {
        self.refresh_dashboard();
        self.refresh_bulk();
    }

    pub fn refresh_dashboard(&mut self) {
        self.dashboard_view = match &self.dataset {
            Some(ds) => derive_dashboard_view(ds, &self.dashboard, self.config.gpa_average),
            None => DerivedView::default(),
        };
        log::debug!("Dashboard view: {} rows", self.dashboard_view.indices.len());
    }

    pub fn refresh_bulk(&mut self) {
        self.bulk_view = match &self.dataset {
            Some(ds) => derive_bulk_view(ds, &self.bulk, self.config.gpa_average),
            None => DerivedView::default(),
        };
        log::debug!("Bulk view: {} rows", self.bulk_view.indices.len());
    }

    /// Re-parse the GPA bound boxes.
    pub fn apply_gpa_bounds(&mut self) {
        self.dashboard.filters.gpa_min = parse_bound(&self.gpa_min_text);
        self.dashboard.filters.gpa_max = parse_bound(&self.gpa_max_text);
        self.refresh_dashboard();
    }

    /// Commit the dashboard name-list box.
    pub fn search_dashboard_names(&mut self) {
        self.dashboard.names = Some(CandidateNames::from_text(&self.dashboard_names_text));
        self.refresh_dashboard();
    }

    pub fn clear_dashboard_names(&mut self) {
        self.dashboard_names_text.clear();
        self.dashboard.names = None;
        self.refresh_dashboard();
    }

    /// Commit the bulk page's text box.
    pub fn search_bulk_text(&mut self) {
        self.bulk.candidates = Some(CandidateNames::from_text(&self.bulk_names_text));
        self.refresh_bulk();
    }

    /// Search with the names of an uploaded list file.
    pub fn search_bulk_file(&mut self, path: &Path) {
        self.bulk.candidates = Some(load_candidates_or_empty(path));
        self.refresh_bulk();
    }

    /// Placeholder for the bulk results area: a prompt before the first
    /// search, a notice when the search matched nobody.
    pub fn bulk_placeholder(&self) -> Option<&'static str> {
        if self.bulk.candidates.is_none() {
            Some("Enter names or upload a name list, then press Find Students.")
        } else if self.bulk_view.indices.is_empty() {
            Some("No matching students.")
        } else {
            None
        }
    }

    pub fn set_gpa_averaging(&mut self, averaging: GpaAveraging) {
        self.config.gpa_average = averaging;
        self.refresh();
    }
}

fn reset_missing(selection: &mut Selection, available: &[String]) {
    if let Selection::Only(value) = selection {
        if !available.contains(value) {
            *selection = Selection::All;
        }
    }
}
