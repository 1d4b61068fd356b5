use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::model::{Dataset, SiteSelection};
use crate::data::view::{handle_event, DashboardInputs, DashboardView};

/// Upper bound of the payload slider unless the data goes beyond it.
pub const SLIDER_MAX_KG: f64 = 10_000.0;
/// Slider step, in kilograms.
pub const SLIDER_STEP_KG: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset. Replaced wholesale on File → Open, never edited.
    pub dataset: Dataset,

    /// File the dataset was read from.
    pub source: PathBuf,

    /// Current control values.
    pub inputs: DashboardInputs,

    /// Chart data for `inputs` (cached until the inputs change).
    pub view: DashboardView,

    /// Colour per launch site (pie, all-sites mode).
    pub site_colors: ColorMap,

    /// Colour per booster version category (scatter).
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the scatter rows table is expanded.
    pub show_table: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, source: &Path) -> Self {
        let inputs = DashboardInputs::initial(&dataset);
        let view = handle_event(&dataset, &inputs);
        let mut state = Self {
            site_colors: ColorMap::new(dataset.sites()),
            booster_colors: ColorMap::new(dataset.booster_categories()),
            dataset,
            source: source.to_path_buf(),
            inputs,
            view,
            status_message: None,
            show_table: false,
        };
        state.refresh_status();
        state
    }

    /// Ingest a newly loaded dataset and reset the controls.
    pub fn set_dataset(&mut self, dataset: Dataset, source: &Path) {
        let show_table = self.show_table;
        *self = Self::new(dataset, source);
        self.show_table = show_table;
    }

    /// Change the site dropdown value.
    pub fn set_selection(&mut self, selection: SiteSelection) {
        if self.inputs.selection != selection {
            self.inputs.selection = selection;
            self.recompute();
        }
    }

    /// Change the payload slider values.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        if self.inputs.payload_low != low || self.inputs.payload_high != high {
            self.inputs.payload_low = low;
            self.inputs.payload_high = high;
            self.recompute();
        }
    }

    /// Restore the payload sliders to the observed min/max.
    pub fn reset_payload_range(&mut self) {
        let full = self.dataset.full_range();
        self.set_payload_range(full.low(), full.high());
    }

    /// Upper end of the payload sliders: 10 000 kg, or the heaviest payload
    /// rounded up to the next step.
    pub fn slider_max(&self) -> f64 {
        let heaviest = self.dataset.payload_bounds().map_or(0.0, |(_, hi)| hi);
        SLIDER_MAX_KG.max((heaviest / SLIDER_STEP_KG).ceil() * SLIDER_STEP_KG)
    }

    /// Recompute the charts after an input change.
    fn recompute(&mut self) {
        self.view = handle_event(&self.dataset, &self.inputs);
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status_message = if self.view.problems.is_empty() {
            None
        } else {
            Some(
                self.view
                    .problems
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };
    }
}
