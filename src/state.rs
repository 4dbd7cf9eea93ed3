use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::model::{Column, ListingTable};
use crate::pipeline::{evaluate, Controls, Snapshot};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Histogram,
    Scatter,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Tables loaded so far, keyed by path.
    pub cache: DatasetCache,

    /// Path of the current dataset.
    pub source: Option<PathBuf>,

    /// Current dataset (None until a load succeeds).
    pub table: Option<Arc<ListingTable>>,

    /// Sidebar controls.
    pub controls: Controls,

    /// Output of the last pipeline run.
    pub snapshot: Option<Snapshot>,

    /// Colours for the `condition` groups of the scatter plot.
    pub color_map: Option<ColorMap>,

    pub active_tab: ChartTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let controls = Controls {
            criteria: Default::default(),
            bins: config.bins.default,
            log_price: config.log_price_by_default,
            show_table: false,
        };
        Self {
            config,
            cache: DatasetCache::new(),
            source: None,
            table: None,
            controls,
            snapshot: None,
            color_map: None,
            active_tab: ChartTab::default(),
            status_message: None,
        }
    }

    /// Load (or fetch from the cache) the dataset at `path` and run the
    /// pipeline. A failed load clears all derived output.
    pub fn open(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match self.cache.get_or_load(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                let err = anyhow::Error::new(e);
                log::error!("Failed to load dataset: {err:#}");
                self.status_message = Some(format!("Error: {err:#}"));
                self.table = None;
                self.snapshot = None;
                self.color_map = None;
            }
        }
    }

    /// Drop the cached copy of the current dataset and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.open(&path);
        }
    }

    /// Empty the whole cache, then read the current dataset again.
    pub fn reload_all(&mut self) {
        let dropped = self.cache.clear();
        log::debug!("Reload all dropped {dropped} tables");
        if let Some(path) = self.source.clone() {
            self.open(&path);
        }
    }

    /// Ingest a newly loaded table, initialise controls and colour.
    fn set_table(&mut self, table: Arc<ListingTable>) {
        if table.is_empty() {
            log::warn!("Dataset has no listings after normalization");
        }
        self.controls = Controls::initial(&table, &self.config);
        self.color_map = table.categories.get(&Column::Condition).map(ColorMap::new);
        self.table = Some(table);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the snapshot after a control change.
    pub fn refresh(&mut self) {
        self.snapshot = self
            .table
            .as_ref()
            .map(|table| evaluate(Arc::clone(table), &self.controls, &self.config));
    }

    /// Replace the controls, re-running the pipeline only if they changed.
    pub fn update_controls(&mut self, controls: Controls) {
        if controls != self.controls {
            self.controls = controls;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_runs_the_pipeline() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cars.csv");
        std::fs::write(&path, "price,condition\n10,good\n-5,fair\n30,good\n").expect("write");

        let mut state = AppState::new(DashboardConfig::default());
        state.open(&path);

        let snapshot = state.snapshot.as_ref().expect("snapshot");
        assert_eq!(snapshot.total_rows, 2);
        assert_eq!(snapshot.summary.median_price, Some(20.0));
        assert!(state.color_map.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn missing_file_halts_with_a_message() {
        let dir = tempdir().expect("temp dir");
        let mut state = AppState::new(DashboardConfig::default());
        state.open(&dir.path().join("vehicles_us.csv"));

        assert!(state.snapshot.is_none());
        assert!(state.table.is_none());
        let message = state.status_message.as_deref().expect("message");
        assert!(message.contains("not found"));
    }

    #[test]
    fn control_changes_recompute_and_reload_rereads() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cars.csv");
        std::fs::write(&path, "price,condition\n10,good\n20,fair\n").expect("write");

        let mut state = AppState::new(DashboardConfig::default());
        state.open(&path);
        assert_eq!(state.snapshot.as_ref().map(|s| s.view.len()), Some(2));

        let mut controls = state.controls.clone();
        controls.criteria.conditions = ["fair".to_string()].into_iter().collect();
        state.update_controls(controls);
        assert_eq!(state.snapshot.as_ref().map(|s| s.view.len()), Some(1));

        std::fs::write(&path, "price,condition\n10,good\n20,fair\n30,new\n").expect("write");
        state.reload();
        assert_eq!(state.snapshot.as_ref().map(|s| s.total_rows), Some(3));
    }

    #[test]
    fn reload_all_drops_every_cached_table() {
        let dir = tempdir().expect("temp dir");
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        std::fs::write(&first, "price\n1\n").expect("write");
        std::fs::write(&second, "price\n1\n2\n").expect("write");

        let mut state = AppState::new(DashboardConfig::default());
        state.open(&first);
        state.open(&second);
        assert_eq!(state.cache.len(), 2);

        std::fs::write(&second, "price\n1\n2\n3\n").expect("write");
        state.reload_all();
        assert_eq!(state.cache.len(), 1);
        assert!(state.cache.contains(&second));
        assert!(!state.cache.contains(&first));
        assert_eq!(state.snapshot.as_ref().map(|s| s.total_rows), Some(3));
    }
}
