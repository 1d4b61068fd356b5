use std::collections::HashMap;

use serde::Serialize;

use super::error::DashError;
use super::model::{Dataset, LaunchRecord, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Pie aggregates
// ---------------------------------------------------------------------------

/// One labelled pie wedge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

impl PieSlice {
    fn new(label: impl Into<String>, value: u64) -> Self {
        PieSlice {
            label: label.into(),
            value,
        }
    }
}

/// Compute the pie series for a site selection.
///
/// * `All` → one slice per site (first-appearance order), valued by the
///   number of successful launches. Sites without a success get a 0 slice.
/// * `Site(s)` → `Success` and `Failure` counts for that site, zeros kept.
///
/// An empty filtered set yields an empty series.
pub fn aggregate(dataset: &Dataset, selection: &SiteSelection) -> Result<Vec<PieSlice>, DashError> {
    selection.validate(dataset)?;

    let slices = match selection {
        SiteSelection::All => successes_by_site(dataset.records()),
        SiteSelection::Site(_) => {
            outcome_split(dataset.records().iter().filter(|r| selection.matches(r)))
        }
    };
    Ok(slices)
}

fn successes_by_site(records: &[LaunchRecord]) -> Vec<PieSlice> {
    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut slices: Vec<PieSlice> = Vec::new();

    for rec in records {
        let idx = *slot.entry(rec.site.as_str()).or_insert_with(|| {
            slices.push(PieSlice::new(rec.site.as_str(), 0));
            slices.len() - 1
        });
        if rec.outcome.is_success() {
            slices[idx].value += 1;
        }
    }
    slices
}

fn outcome_split<'a>(records: impl Iterator<Item = &'a LaunchRecord>) -> Vec<PieSlice> {
    let (mut success, mut failure) = (0u64, 0u64);
    for rec in records {
        match rec.outcome {
            Outcome::Success => success += 1,
            Outcome::Failure => failure += 1,
        }
    }
    if success + failure == 0 {
        return Vec::new();
    }
    vec![
        PieSlice::new(Outcome::Success.to_string(), success),
        PieSlice::new(Outcome::Failure.to_string(), failure),
    ]
}

/// Chart title for the pie view.
pub fn pie_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Total Successful Launches by Site".to_string(),
        SiteSelection::Site(site) => format!("Success vs. Failure for {site}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, small_dataset};

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    #[test]
    fn test_all_sites_counts_successes() {
        let slices = aggregate(&small_dataset(), &SiteSelection::All).unwrap();
        assert_eq!(
            slices,
            vec![PieSlice::new("CCAFS", 1), PieSlice::new("KSC", 1)]
        );
    }

    #[test]
    fn test_all_sites_total_matches_success_count() {
        let ds = Dataset::from_records(vec![
            record("VAFB", 9600.0, 0, "FT"),
            record("KSC", 3000.0, 1, "FT"),
            record("CCAFS", 500.0, 1, "v1.0"),
            record("KSC", 2500.0, 1, "B4"),
            record("CCAFS", 4000.0, 0, "B5"),
        ]);
        let slices = aggregate(&ds, &SiteSelection::All).unwrap();
        let total: u64 = slices.iter().map(|s| s.value).sum();
        let successes = ds.records().iter().filter(|r| r.outcome.is_success()).count();
        assert_eq!(total, successes as u64);

        // First-appearance order, zero-success sites kept.
        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["VAFB", "KSC", "CCAFS"]);
        assert_eq!(slices[0].value, 0);
    }

    #[test]
    fn test_single_site_partitions_records() {
        let ds = small_dataset();
        let slices = aggregate(&ds, &site("CCAFS")).unwrap();
        assert_eq!(
            slices,
            vec![PieSlice::new("Success", 1), PieSlice::new("Failure", 1)]
        );
        let n_site = ds.records().iter().filter(|r| r.site == "CCAFS").count();
        assert_eq!(slices.iter().map(|s| s.value).sum::<u64>(), n_site as u64);
    }

    #[test]
    fn test_single_site_keeps_zero_failure() {
        let slices = aggregate(&small_dataset(), &site("KSC")).unwrap();
        assert_eq!(
            slices,
            vec![PieSlice::new("Success", 1), PieSlice::new("Failure", 0)]
        );
    }

    #[test]
    fn test_unknown_site_is_rejected() {
        let err = aggregate(&small_dataset(), &site("Boca Chica")).unwrap_err();
        assert_eq!(err, DashError::InvalidSelection("Boca Chica".to_string()));
    }

    #[test]
    fn test_empty_dataset_yields_empty_series() {
        let ds = Dataset::from_records(Vec::new());
        assert!(aggregate(&ds, &SiteSelection::All).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let ds = small_dataset();
        let first = aggregate(&ds, &site("CCAFS")).unwrap();
        let _ = aggregate(&ds, &SiteSelection::All).unwrap();
        let second = aggregate(&ds, &site("CCAFS")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pie_title() {
        assert_eq!(pie_title(&SiteSelection::All), "Total Successful Launches by Site");
        assert_eq!(pie_title(&site("KSC")), "Success vs. Failure for KSC");
    }
}
