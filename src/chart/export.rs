use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::spec::ChartSpec;

/// Write `spec` as pretty-printed JSON. Undefined values (`NaN`) are
/// written as `null`.
pub fn write_json(spec: &ChartSpec, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, spec).context("serializing chart")?;
    writer.flush().context("flushing chart file")?;
    log::info!("Exported '{}' to {}", spec.title(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::HeatmapSpec;
    use serde_json::Value;

    #[test]
    fn heatmap_round_trips_as_tagged_json() {
        let spec = ChartSpec::Heatmap(HeatmapSpec {
            title: "Correlation Heatmap".into(),
            labels: vec!["Age".into(), "Fare".into()],
            values: vec![vec![1.0, f64::NAN], vec![f64::NAN, 1.0]],
            annotate: true,
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        write_json(&spec, &path).unwrap();

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["type"], "heatmap");
        assert_eq!(json["labels"][1], "Fare");
        assert_eq!(json["values"][0][0], 1.0);
        assert!(json["values"][0][1].is_null());
    }

    #[test]
    fn unwritable_path_errors() {
        let spec = ChartSpec::Heatmap(HeatmapSpec {
            title: "t".into(),
            labels: vec![],
            values: vec![],
            annotate: true,
        });
        assert!(write_json(&spec, Path::new("/no/such/dir/chart.json")).is_err());
    }
}
