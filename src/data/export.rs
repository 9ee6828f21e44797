use std::path::Path;

use anyhow::{Context, Result};

use super::model::PlotData;

/// Write every point of `plot` as a `series,x,y` row.
pub fn export_csv(plot: &PlotData, path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV {}", path.display()))?;
    writer
        .write_record(["series", "x", "y"])
        .context("writing CSV header")?;

    let mut rows = 0;
    for series in &plot.series {
        for [x, y] in &series.points {
            writer
                .write_record([series.name.clone(), x.to_string(), y.to_string()])
                .with_context(|| format!("writing CSV row {rows}"))?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;
    log::info!("exported {rows} points of '{}' to {}", plot.title, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PlotSeries, PlotStyle};

    #[test]
    fn one_row_per_point() {
        let plot = PlotData {
            title: "Power".into(),
            x_label: "Time (s)".into(),
            y_label: "Power".into(),
            style: PlotStyle::Line,
            series: vec![
                PlotSeries {
                    name: "Active power (P)".into(),
                    points: vec![[0.0, 1.5], [0.5, 1.5]],
                },
                PlotSeries {
                    name: "u(t)".into(),
                    points: vec![[0.0, -2.25]],
                },
            ],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.csv");
        assert_eq!(export_csv(&plot, &path).unwrap(), 3);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, ["series", "x", "y"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "Active power (P)");
        assert_eq!(rows[1][1].parse::<f64>().unwrap(), 0.5);
        assert_eq!(rows[2][2].parse::<f64>().unwrap(), -2.25);
    }
}
