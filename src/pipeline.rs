use std::path::Path;
use std::sync::Arc;

use crate::data::{
    find_minimum, minimum, select, ActiveDataset, ConfigLabel, DataError, DatasetPair,
    LoaderCache, MeasurementTable, ThreadTiming,
};

// ---------------------------------------------------------------------------
// Request-scoped context
// ---------------------------------------------------------------------------

/// What the user currently asked to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub selected_label: ConfigLabel,
    pub comparison_enabled: bool,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            selected_label: ConfigLabel::MacosM1Pro,
            comparison_enabled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Prepared view – everything the view composer needs for one frame
// ---------------------------------------------------------------------------

/// One series of the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSeries {
    pub label: ConfigLabel,
    /// `None` when the table is empty; the series is drawn without annotation.
    pub minimum: Option<ThreadTiming>,
}

/// Result of one pass through select → extremum for a [`ViewContext`].
#[derive(Debug, Clone)]
pub struct PreparedView {
    datasets: Arc<DatasetPair>,
    pub label: ConfigLabel,
    pub minimum: ThreadTiming,
    pub comparison: Option<[ComparisonSeries; 2]>,
}

impl PreparedView {
    /// The active table.
    pub fn active(&self) -> &MeasurementTable {
        self.datasets.table(self.label)
    }

    pub fn table(&self, label: ConfigLabel) -> &MeasurementTable {
        self.datasets.table(label)
    }
}

// ---------------------------------------------------------------------------
// Session – loaded tables for one source
// ---------------------------------------------------------------------------

/// The immutable tables of one source plus the operations consumers call on them.
#[derive(Debug, Clone)]
pub struct Session {
    datasets: Arc<DatasetPair>,
}

impl Session {
    /// Load (or reuse) the tables of `source` through `cache`.
    pub fn open(cache: &mut LoaderCache, source: &Path) -> Result<Self, DataError> {
        let datasets = cache.get_or_load(source)?;
        Ok(Self { datasets })
    }

    /// Wrap already-loaded tables.
    pub fn from_datasets(datasets: Arc<DatasetPair>) -> Self {
        Self { datasets }
    }

    /// `getActiveDataset(label)`.
    pub fn active_dataset(&self, label: &str) -> Result<ActiveDataset<'_>, DataError> {
        select::select_by_name(label, &self.datasets)
    }

    /// `getBothDatasets()`.
    pub fn both_datasets(&self) -> &DatasetPair {
        &self.datasets
    }

    /// `getMinimum(rows)`.
    pub fn minimum(&self, rows: &[ThreadTiming]) -> Option<ThreadTiming> {
        minimum(rows)
    }

    /// Run select → extremum for `ctx`.
    ///
    /// Fails with [`DataError::EmptyTable`] when the active table has no rows.
    pub fn prepare(&self, ctx: &ViewContext) -> Result<PreparedView, DataError> {
        let active = select::select(ctx.selected_label, &self.datasets);
        let minimum = find_minimum(active.table).inspect_err(|e| log::warn!("{e}"))?;

        let comparison = ctx.comparison_enabled.then(|| {
            ConfigLabel::ALL.map(|label| {
                let table = self.datasets.table(label);
                let minimum = crate::data::minimum(table.rows());
                if minimum.is_none() {
                    log::warn!("`{label}` has no rows; comparing without its minimum");
                }
                ComparisonSeries { label, minimum }
            })
        });

        log::debug!(
            "Prepared view for {} (comparison: {}): minimum {} threads / {} s",
            ctx.selected_label,
            ctx.comparison_enabled,
            minimum.thread_count,
            minimum.real_time_used
        );

        Ok(PreparedView {
            datasets: Arc::clone(&self.datasets),
            label: ctx.selected_label,
            minimum,
            comparison,
        })
    }
}
