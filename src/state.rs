use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::data::aggregate::DashboardView;
use crate::data::filter::{entity_options, year_options, Filters, Selection};
use crate::data::loader::{load_file, LoadOptions};
use crate::data::model::{CrimeDataset, Period, Summary};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Temporal,
    CrimeTypes,
    Entities,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Temporal, Tab::CrimeTypes, Tab::Entities];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Temporal => "Evolución temporal de delitos",
            Tab::CrimeTypes => "Comparación por tipo de delito",
            Tab::Entities => "Total de delitos por entidad",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds, or after one fails).
    pub dataset: Option<CrimeDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Headline metrics over the unfiltered dataset.
    pub summary: Option<Summary>,

    /// Current selector values.
    pub filters: Filters,

    /// Selector contents, derived from the dataset.
    pub year_options: Vec<Selection<i32>>,
    pub entity_options: Vec<Selection<String>>,

    /// Charts for the current filters (recomputed on every change).
    pub view: Option<DashboardView>,

    pub tab: Tab,

    /// Error shown in place of the dashboard.
    pub status_message: Option<String>,

    pub load_options: LoadOptions,
    pub top_n: usize,
}

impl AppState {
    pub fn new(load_options: LoadOptions, top_n: usize) -> Self {
        Self {
            dataset: None,
            source: None,
            summary: None,
            filters: Filters::default(),
            year_options: Vec::new(),
            entity_options: Vec::new(),
            view: None,
            tab: Tab::default(),
            status_message: None,
            load_options,
            top_n,
        }
    }

    /// Load `path`, replacing the current dataset.  A failure clears the
    /// dashboard and leaves only the error message.
    pub fn open(&mut self, path: &Path) {
        match load_file(path, &self.load_options)
            .with_context(|| format!("loading {}", path.display()))
        {
            Ok(dataset) => self.set_dataset(dataset, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.clear();
                self.status_message = Some(format!("Error al cargar los datos: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset selectors and compute the charts.
    pub fn set_dataset(&mut self, dataset: CrimeDataset, source: Option<PathBuf>) {
        self.filters = Filters::default();
        self.year_options = year_options(&dataset);
        self.entity_options = entity_options(&dataset);
        self.summary = Some(dataset.summary());
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
        self.recompute();
    }

    fn clear(&mut self) {
        self.dataset = None;
        self.source = None;
        self.summary = None;
        self.view = None;
        self.year_options.clear();
        self.entity_options.clear();
        self.filters = Filters::default();
    }

    /// Whether a dataset is loaded and no error is pending.
    pub fn is_ready(&self) -> bool {
        self.dataset.is_some() && self.status_message.is_none()
    }

    pub fn set_year(&mut self, year: Selection<i32>) {
        if self.filters.year != year {
            self.filters.year = year;
            self.recompute();
        }
    }

    pub fn set_entity(&mut self, entity: Selection<String>) {
        if self.filters.entity != entity {
            self.filters.entity = entity;
            self.recompute();
        }
    }

    pub fn set_period(&mut self, period: Period) {
        if self.filters.period != period {
            self.filters.period = period;
            self.recompute();
        }
    }

    /// Rebuild every chart from the dataset and the current filters.
    pub fn recompute(&mut self) {
        self.view = self
            .dataset
            .as_ref()
            .map(|ds| DashboardView::compute(ds, &self.filters, self.top_n));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CrimeRecord, Month};

    fn dataset() -> CrimeDataset {
        let mut jan = [None; 12];
        jan[0] = Some(5.0);
        let mut feb = [None; 12];
        feb[1] = Some(7.0);
        CrimeDataset::from_records(vec![
            CrimeRecord::new("Colima", 2020, "Robo", jan),
            CrimeRecord::new("Sonora", 2021, "Fraude", feb),
        ])
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(LoadOptions::default(), 15);
        state.set_dataset(dataset(), None);
        state
    }

    #[test]
    fn set_dataset_populates_selectors_and_charts() {
        let state = ready_state();
        assert!(state.is_ready());
        assert_eq!(state.year_options.len(), 3);
        assert_eq!(state.entity_options.len(), 3);
        assert_eq!(state.summary.unwrap().total, 12.0);

        let view = state.view.as_ref().unwrap();
        assert_eq!(
            view.temporal.points,
            vec![(Month::Enero, 5.0), (Month::Febrero, 7.0)]
        );
    }

    #[test]
    fn changing_a_filter_recomputes() {
        let mut state = ready_state();
        state.set_year(Selection::Specific(2021));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.temporal.points, vec![(Month::Febrero, 7.0)]);
        assert_eq!(view.crime_types.leader().unwrap().label, "Fraude");

        state.set_period(Period::Month(Month::Enero));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.entities.leader().unwrap().value, 0.0);
    }

    #[test]
    fn summary_ignores_filters() {
        let mut state = ready_state();
        state.set_entity(Selection::Specific("Colima".to_string()));
        assert_eq!(state.summary.unwrap().records, 2);
    }

    #[test]
    fn failed_open_clears_dashboard() {
        let mut state = ready_state();
        state.open(Path::new("no/such/file.csv"));
        assert!(!state.is_ready());
        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        let message = state.status_message.unwrap();
        assert!(message.starts_with("Error al cargar los datos"));
        assert!(message.contains("file.csv"));
    }
}
