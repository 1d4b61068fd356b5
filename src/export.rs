use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::view::DashboardView;

/// Write the chart data for the current view as pretty-printed JSON.
pub fn write_view(path: &Path, view: &DashboardView) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, view).context("serialising view")?;
    writer.flush().context("writing view")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::small_dataset;
    use crate::data::view::{handle_event, DashboardInputs};

    #[test]
    fn test_write_view() {
        let ds = small_dataset();
        let view = handle_event(&ds, &DashboardInputs::initial(&ds));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        write_view(&path, &view).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["pie"]["title"], "Total Successful Launches by Site");
        assert_eq!(json["scatter"]["points"].as_array().unwrap().len(), 3);
        assert!(json["problems"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_write_view_bad_path() {
        let ds = small_dataset();
        let view = handle_event(&ds, &DashboardInputs::initial(&ds));
        let dir = tempfile::tempdir().unwrap();
        assert!(write_view(&dir.path().join("missing").join("view.json"), &view).is_err());
    }
}
