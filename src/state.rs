use std::path::PathBuf;

use crate::color::SeriesColors;
use crate::config::PresentationConfig;
use crate::data::{ConfigLabel, LoaderCache};
use crate::pipeline::{PreparedView, Session, ViewContext};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Source currently shown.
    pub source: PathBuf,

    /// Memoized loads, keyed by source path.
    cache: LoaderCache,

    /// Tables of `source` (None until a load succeeded).
    pub session: Option<Session>,

    /// Label / comparison chosen in the side panel.
    pub context: ViewContext,

    /// Output of the last pipeline pass.
    pub view: Option<PreparedView>,

    /// Error replacing the charts, if the last pass failed.
    pub error_message: Option<String>,

    pub presentation: PresentationConfig,
    pub colors: SeriesColors,
}

impl AppState {
    pub fn new(source: PathBuf, presentation: PresentationConfig) -> Self {
        let colors = SeriesColors::from_config(&presentation);
        let mut state = Self {
            source,
            cache: LoaderCache::new(),
            session: None,
            context: ViewContext::default(),
            view: None,
            error_message: None,
            presentation,
            colors,
        };
        state.reload();
        state
    }

    /// Switch to another source file.
    pub fn open_source(&mut self, path: PathBuf) {
        self.source = path;
        self.reload();
    }

    /// Drop the cached tables and read `source` again, even if its
    /// length and modification time look unchanged.
    pub fn force_reload(&mut self) {
        self.cache.invalidate(&self.source);
        self.reload();
    }

    /// (Re)load `source` through the cache; unchanged files are not re-read.
    pub fn reload(&mut self) {
        match Session::open(&mut self.cache, &self.source) {
            Ok(session) => {
                self.session = Some(session);
                self.refresh();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.source.display());
                self.session = None;
                self.view = None;
                self.error_message = Some(error_chain(&e));
            }
        }
    }

    /// Change the active label and recompute.
    pub fn select_label(&mut self, label: ConfigLabel) {
        if self.context.selected_label != label {
            self.context.selected_label = label;
            self.refresh();
        }
    }

    /// Toggle the comparison chart and recompute.
    pub fn set_comparison(&mut self, enabled: bool) {
        if self.context.comparison_enabled != enabled {
            self.context.comparison_enabled = enabled;
            self.refresh();
        }
    }

    /// Re-run the pipeline for the current context.
    pub fn refresh(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        match session.prepare(&self.context) {
            Ok(view) => {
                self.view = Some(view);
                self.error_message = None;
            }
            Err(e) => {
                self.view = None;
                self.error_message = Some(error_chain(&e));
            }
        }
    }
}

/// `error: cause: cause` on one line, like anyhow's `{:#}`.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ThreadTiming;

    fn write_source(dir: &std::path::Path) -> PathBuf {
        use crate::data::schema::{THREADS_COLUMN, TIME_COLUMN};

        let path = dir.join("execution_time.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let macos = workbook.add_worksheet();
        macos.set_name("MACOS-M1PRO").unwrap();
        macos.write_string(0, 0, THREADS_COLUMN).unwrap();
        macos.write_string(0, 1, TIME_COLUMN).unwrap();
        for (r, (threads, secs)) in [(1.0, 10.2), (4.0, 3.1)].into_iter().enumerate() {
            macos.write_number(r as u32 + 1, 0, threads).unwrap();
            macos.write_number(r as u32 + 1, 1, secs).unwrap();
        }
        // Header only: loads fine, but has no minimum.
        let ubuntu = workbook.add_worksheet();
        ubuntu.set_name("UBUNTU-I7").unwrap();
        ubuntu.write_string(0, 0, THREADS_COLUMN).unwrap();
        ubuntu.write_string(0, 1, TIME_COLUMN).unwrap();
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn missing_source_shows_error_instead_of_view() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().join("missing.xlsx"), PresentationConfig::light());
        assert!(state.view.is_none());
        let msg = state.error_message.unwrap();
        assert!(msg.starts_with("cannot load data"), "{msg}");
    }

    #[test]
    fn switching_to_empty_table_replaces_chart_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(write_source(dir.path()), PresentationConfig::light());
        assert_eq!(state.view.as_ref().unwrap().minimum, ThreadTiming::new(4, 3.1));

        state.select_label(ConfigLabel::UbuntuI7);
        assert!(state.view.is_none());
        assert_eq!(
            state.error_message.as_deref(),
            Some("no data to display for `UBUNTU-I7`")
        );

        state.select_label(ConfigLabel::MacosM1Pro);
        assert!(state.view.is_some());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn force_reload_recovers_after_source_is_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("execution_time.xlsx");
        let mut state = AppState::new(path.clone(), PresentationConfig::light());
        assert!(state.view.is_none());

        assert_eq!(write_source(dir.path()), path);
        state.force_reload();
        assert!(state.error_message.is_none());
        assert_eq!(state.view.as_ref().unwrap().minimum, ThreadTiming::new(4, 3.1));
    }

    #[test]
    fn comparison_toggle_recomputes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(write_source(dir.path()), PresentationConfig::light());
        assert!(state.view.as_ref().unwrap().comparison.is_none());
        state.set_comparison(true);
        assert!(state.view.as_ref().unwrap().comparison.is_some());
    }
}
