use std::path::Path;

use conic_fit::StepReport;
use plotters::{coord::types::RangedCoordf64, prelude::*};

const ERROR_COLOR: RGBColor = RGBColor(0x58, 0x50, 0x8d);
const BEST_COLOR: RGBColor = RGBColor(0xff, 0x63, 0x61);

const LABEL_STYLE: (&str, i32) = ("sans-serif", 30);

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Plots `log10(relative error)` against `log10(step)`.
/// Steps with an error of exactly 0 have no logarithm, so they're left out.
pub fn save_png(steps: &[StepReport], output_path: &Path) -> anyhow::Result<()> {
    let points: Vec<(f64, f64)> = steps
        .iter()
        .filter(|s| s.rel_error > 0.0)
        .map(|s| (s.step.log10(), s.rel_error.log10()))
        .collect();
    let best = points
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let bounds = Bounds::new(&points);

    let width = 800;
    let height = 600;
    let dpi_scale = 2;
    let root = BitMapBackend::new(output_path, (width * dpi_scale, height * dpi_scale))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .caption("Forward difference error", ("sans-serif", 50))
        .build_cartesian_2d(bounds.min_x..bounds.max_x, bounds.min_y..bounds.max_y)?;

    draw_axes(&mut chart)?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        ERROR_COLOR.stroke_width(3),
    ))?;
    for &point in &points {
        draw_point(&mut chart, point, ERROR_COLOR, None)?;
    }
    if let Some(best) = best {
        draw_point(&mut chart, best, BEST_COLOR, Some("best"))?;
    }

    // Finished.
    root.present()?;
    println!("Plot saved to {}", output_path.display());
    Ok(())
}

/// Span of the chart area
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn new(points: &[(f64, f64)]) -> Self {
        let (xs, ys): (Vec<_>, Vec<_>) = points.iter().copied().unzip();
        let padding = 0.5;
        let min_x = xs.iter().copied().reduce(f64::min).unwrap_or(0.0) - padding;
        let max_x = xs.iter().copied().reduce(f64::max).unwrap_or(0.0) + padding;
        let min_y = ys.iter().copied().reduce(f64::min).unwrap_or(0.0) - padding;
        let max_y = ys.iter().copied().reduce(f64::max).unwrap_or(0.0) + padding;
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

fn draw_axes<DB: DrawingBackend>(chart: &mut Chart<'_, DB>) -> anyhow::Result<()>
where
    <DB as plotters::prelude::DrawingBackend>::ErrorType: 'static,
{
    chart
        .configure_mesh()
        .x_desc("log10(step)")
        .y_desc("log10(relative error)")
        .label_style(LABEL_STYLE)
        .axis_desc_style(LABEL_STYLE)
        .draw()?;
    Ok(())
}

fn draw_point<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    (x, y): (f64, f64),
    color: RGBColor,
    label: Option<&str>,
) -> anyhow::Result<()>
where
    <DB as plotters::prelude::DrawingBackend>::ErrorType: 'static,
{
    let label = label.unwrap_or_default().to_owned();
    chart.draw_series(PointSeries::of_element(
        vec![(x, y)],
        6,
        &color,
        &|coord, size, style| {
            EmptyElement::at(coord)
                + Circle::new((0, 0), size, style.filled())
                + Text::new(label.clone(), (10, -10), LABEL_STYLE.into_font())
        },
    ))?;
    Ok(())
}
