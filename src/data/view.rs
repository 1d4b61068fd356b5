use serde::Serialize;

use super::aggregate::{aggregate, pie_title, PieSlice};
use super::error::DashError;
use super::filter::{scatter_points, scatter_title, ScatterPoint};
use super::model::{Dataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Event → view
// ---------------------------------------------------------------------------

/// Current raw values of the dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardInputs {
    pub selection: SiteSelection,
    pub payload_low: f64,
    pub payload_high: f64,
}

impl DashboardInputs {
    /// Controls as they are when a dataset is first shown: every site, full range.
    pub fn initial(dataset: &Dataset) -> Self {
        let range = dataset.full_range();
        DashboardInputs {
            selection: SiteSelection::All,
            payload_low: range.low(),
            payload_high: range.high(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieView {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

/// Everything the charts need for one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub inputs: DashboardInputs,
    pub pie: PieView,
    pub scatter: ScatterView,
    /// Rejected inputs. The affected series are empty.
    pub problems: Vec<DashError>,
}

/// Recompute both charts from the current inputs.
///
/// Never fails: invalid input yields empty series and an entry in `problems`.
pub fn handle_event(dataset: &Dataset, inputs: &DashboardInputs) -> DashboardView {
    let mut problems = Vec::new();

    let slices = aggregate(dataset, &inputs.selection).unwrap_or_else(|e| {
        problems.push(e);
        Vec::new()
    });

    let points = PayloadRange::new(inputs.payload_low, inputs.payload_high)
        .and_then(|range| scatter_points(dataset, &inputs.selection, &range))
        .unwrap_or_else(|e| {
            if !problems.contains(&e) {
                problems.push(e);
            }
            Vec::new()
        });

    for p in &problems {
        log::warn!("Rejected dashboard input: {p}");
    }
    log::debug!(
        "Recomputed view for {}: {} slices, {} points",
        inputs.selection,
        slices.len(),
        points.len()
    );

    DashboardView {
        inputs: inputs.clone(),
        pie: PieView {
            title: pie_title(&inputs.selection),
            slices,
        },
        scatter: ScatterView {
            title: scatter_title(&inputs.selection),
            points,
        },
        problems,
    }
}
