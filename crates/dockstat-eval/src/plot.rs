//! Two-panel ablation figure: success rate and mean RMSD against the
//! number of inference steps.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, warn};

use dockstat_common::{DockstatError, ExperimentKey, Result};

use crate::report::ComparisonTable;

/// 14 x 5 inches at 300 DPI.
pub const FIGURE_SIZE: (u32, u32) = (4200, 1500);

const CORAL: RGBColor = RGBColor(255, 127, 80);
const LINE_WIDTH: u32 = 6;
const MARKER_SIZE: i32 = 16;

fn plot_err<E: std::fmt::Display>(e: E) -> DockstatError {
    DockstatError::Plot(e.to_string())
}

/// Columns plotted in the success panel: contain `success`
/// (case-insensitive) and the `2A` threshold marker.
pub fn success_columns(table: &ComparisonTable) -> Vec<&str> {
    table
        .metric_columns()
        .iter()
        .filter(|c| c.to_lowercase().contains("success") && c.contains("2A"))
        .map(|c| c.as_str())
        .collect()
}

/// First column containing both `mean` and `rmsd`, case-insensitively.
pub fn mean_rmsd_column(table: &ComparisonTable) -> Option<&str> {
    table
        .metric_columns()
        .iter()
        .find(|c| {
            let lower = c.to_lowercase();
            lower.contains("mean") && lower.contains("rmsd")
        })
        .map(|c| c.as_str())
}

fn step_series(table: &ComparisonTable, column: &str) -> Vec<(f64, f64)> {
    table
        .numeric_series(column)
        .into_iter()
        .filter_map(|(key, v)| match key {
            ExperimentKey::Steps(steps) => Some((f64::from(*steps), v)),
            ExperimentKey::Name(_) => None,
        })
        .collect()
}

fn step_range(table: &ComparisonTable) -> std::ops::Range<f64> {
    let steps: Vec<f64> = table
        .keys()
        .into_iter()
        .filter_map(|k| match k {
            ExperimentKey::Steps(s) => Some(f64::from(*s)),
            ExperimentKey::Name(_) => None,
        })
        .collect();
    let min = steps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = steps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad)..(max + pad)
}

/// Render the ablation figure to `path` (PNG).
///
/// Returns `Ok(None)` without touching the filesystem when the table has no
/// 2 Å success-rate column.
pub fn plot_ablation(table: &ComparisonTable, path: &Path) -> Result<Option<PathBuf>> {
    let success = success_columns(table);
    if success.is_empty() {
        warn!("Could not find success rate columns for plotting");
        return Ok(None);
    }

    let x_range = step_range(table);
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((1, 2));

    // Success rate panel
    let mut chart = ChartBuilder::on(&panels[0])
        .caption(
            "Success Rate vs Inference Steps",
            ("sans-serif", 56).into_font().style(FontStyle::Bold),
        )
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(150)
        .build_cartesian_2d(x_range.clone(), 0f64..105f64)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Number of Inference Steps")
        .y_desc("Success Rate (%)")
        .axis_desc_style(("sans-serif", 40))
        .label_style(("sans-serif", 32))
        .light_line_style(BLACK.mix(0.05))
        .draw()
        .map_err(plot_err)?;

    for (i, column) in success.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let points = step_series(table, column);
        debug!("Plotting {} points for {}", points.len(), column);

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(LINE_WIDTH)))
            .map_err(plot_err)?
            .label(*column)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(LINE_WIDTH))
            });
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, MARKER_SIZE, color.filled())))
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 32))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    // Mean RMSD panel
    let mean_points = mean_rmsd_column(table)
        .map(|c| step_series(table, c))
        .unwrap_or_default();
    let y_max = mean_points
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(&panels[1])
        .caption(
            "Mean RMSD vs Inference Steps",
            ("sans-serif", 56).into_font().style(FontStyle::Bold),
        )
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(150)
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Number of Inference Steps")
        .y_desc("Mean RMSD (Å)")
        .axis_desc_style(("sans-serif", 40))
        .label_style(("sans-serif", 32))
        .light_line_style(BLACK.mix(0.05))
        .draw()
        .map_err(plot_err)?;

    if !mean_points.is_empty() {
        chart
            .draw_series(LineSeries::new(
                mean_points.clone(),
                CORAL.stroke_width(LINE_WIDTH),
            ))
            .map_err(plot_err)?;
        chart
            .draw_series(mean_points.iter().map(|&p| {
                EmptyElement::at(p)
                    + Rectangle::new(
                        [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                        CORAL.filled(),
                    )
            }))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockstat_common::MetricRecord;

    fn table(columns: &[(&str, f64)]) -> ComparisonTable {
        let mut record = MetricRecord::new(ExperimentKey::Steps(10));
        record.insert("num_complexes", 3usize);
        for (name, value) in columns {
            record.insert(*name, *value);
        }
        ComparisonTable::from_records(vec![record]).unwrap()
    }

    #[test]
    fn test_column_selection() {
        let t = table(&[
            ("rmsd_top1_mean", 1.2),
            ("rmsd_top1_success_2A", 60.0),
            ("rmsd_top1_success_5A", 90.0),
            ("RMSD_top5_Success_2A", 70.0),
        ]);
        assert_eq!(
            success_columns(&t),
            vec!["rmsd_top1_success_2A", "RMSD_top5_Success_2A"]
        );
        assert_eq!(mean_rmsd_column(&t), Some("rmsd_top1_mean"));
    }

    #[test]
    fn test_lowercase_marker_is_not_a_success_column() {
        let t = table(&[("rmsd_success_2a", 50.0)]);
        assert!(success_columns(&t).is_empty());
    }

    #[test]
    fn test_skips_without_success_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ablation_inference_steps.png");
        let t = table(&[("rmsd_top1_mean", 1.2)]);

        assert!(plot_ablation(&t, &path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_step_range_pads_single_point() {
        let t = table(&[]);
        let range = step_range(&t);
        assert!(range.start < 10.0 && range.end > 10.0);
    }
}
