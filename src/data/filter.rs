use serde::Serialize;

use super::error::DashError;
use super::model::{Dataset, LaunchRecord, Outcome, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Range filter: payload bounds + optional site
// ---------------------------------------------------------------------------

/// The fields the scatter chart needs from a launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
        }
    }
}

/// Return the launches whose payload lies in `range` (inclusive) and, unless
/// the selection is `All`, whose site equals the selected site.
///
/// Output keeps dataset order. No dedup, no sorting.
pub fn filter_records<'a>(
    dataset: &'a Dataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Result<Vec<&'a LaunchRecord>, DashError> {
    selection.validate(dataset)?;

    Ok(dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg) && selection.matches(rec))
        .collect())
}

/// [`filter_records`] projected onto scatter points.
pub fn scatter_points(
    dataset: &Dataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Result<Vec<ScatterPoint>, DashError> {
    Ok(filter_records(dataset, selection, range)?
        .into_iter()
        .map(ScatterPoint::from)
        .collect())
}

/// Chart title for the scatter view.
pub fn scatter_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(site) => format!("Correlation between Payload and Success for {site}"),
    }
}
