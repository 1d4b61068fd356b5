use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::error::DashError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Convert a raw `class` value. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric class (0 or 1) used as the scatter y value.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table). Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// SiteSelection – the dropdown value
// ---------------------------------------------------------------------------

/// Either every site, or one named launch site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Sentinel string meaning "no site filter".
    pub const ALL: &'static str = "ALL";

    /// Parse a dropdown value. `"ALL"` is the sentinel, anything else a site name.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Fail with [`DashError::InvalidSelection`] when the named site is unknown.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), DashError> {
        match self {
            SiteSelection::All => Ok(()),
            SiteSelection::Site(site) if dataset.contains_site(site) => Ok(()),
            SiteSelection::Site(site) => Err(DashError::InvalidSelection(site.clone())),
        }
    }

    /// Human readable label for the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{}", Self::ALL),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive slider bounds
// ---------------------------------------------------------------------------

/// Inclusive payload bounds in kilograms, `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, DashError> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(DashError::InvalidRange { low, high });
        }
        Ok(PayloadRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed site and category indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All launches, in file order.
    records: Vec<LaunchRecord>,
    /// Sorted distinct launch sites.
    sites: Vec<String>,
    /// Sorted distinct booster version categories.
    booster_categories: Vec<String>,
    /// Observed (min, max) payload; `None` for an empty dataset.
    payload_bounds: Option<(f64, f64)>,
}

impl Dataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<&str> = BTreeSet::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            sites.insert(&rec.site);
            categories.insert(&rec.booster_version_category);
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        let sites = sites.into_iter().map(str::to_string).collect();
        let booster_categories = categories.into_iter().map(str::to_string).collect();
        Dataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.binary_search_by(|s| s.as_str().cmp(site)).is_ok()
    }

    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// The range covering every observed payload, `[0, 0]` when empty.
    pub fn full_range(&self) -> PayloadRange {
        let (low, high) = self.payload_bounds.unwrap_or((0.0, 0.0));
        PayloadRange {
            low: low.max(0.0),
            high: high.max(0.0),
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version_category: booster.to_string(),
        }
    }

    /// The three-row dataset used throughout the docs.
    pub(crate) fn small_dataset() -> Dataset {
        Dataset::from_records(vec![
            record("CCAFS", 500.0, 1, "v1.0"),
            record("CCAFS", 9000.0, 0, "FT"),
            record("KSC", 3000.0, 1, "FT"),
        ])
    }

    #[test]
    fn test_indices() {
        let ds = small_dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), &["CCAFS".to_string(), "KSC".to_string()]);
        assert_eq!(ds.booster_categories(), &["FT".to_string(), "v1.0".to_string()]);
        assert_eq!(ds.payload_bounds(), Some((500.0, 9000.0)));
        assert!(ds.contains_site("KSC"));
        assert!(!ds.contains_site("VAFB"));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
        assert_eq!(ds.full_range(), PayloadRange::new(0.0, 0.0).unwrap());
    }

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::Success.class(), 1);
    }

    #[test]
    fn test_site_selection_parse_and_validate() {
        let ds = small_dataset();
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::parse("KSC"),
            SiteSelection::Site("KSC".to_string())
        );
        assert!(SiteSelection::parse("KSC").validate(&ds).is_ok());
        assert_eq!(
            SiteSelection::parse("VAFB").validate(&ds),
            Err(DashError::InvalidSelection("VAFB".to_string()))
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
    }

    #[test]
    fn test_payload_range_validation() {
        assert!(PayloadRange::new(0.0, 4000.0).is_ok());
        assert!(PayloadRange::new(2000.0, 2000.0).is_ok());
        assert!(matches!(
            PayloadRange::new(5000.0, 1000.0),
            Err(DashError::InvalidRange { .. })
        ));
        assert!(PayloadRange::new(-1.0, 10.0).is_err());
        assert!(PayloadRange::new(0.0, f64::NAN).is_err());

        let r = PayloadRange::new(1000.0, 2000.0).unwrap();
        assert!(r.contains(1000.0));
        assert!(r.contains(2000.0));
        assert!(!r.contains(2000.5));
    }
}
