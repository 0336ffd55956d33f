//! 使用 plotters 渲染静态学习曲线图

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::curves::{AxisBounds, Curve, format_tick};
use crate::models::PlotConfig;

const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

pub fn curve_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// 将曲线渲染到文件，扩展名为 `.svg` 时输出SVG，否则输出位图
pub fn render_figure(curves: &[Curve], performance: &str, plot: &PlotConfig, output: &Path) -> Result<()> {
    let bounds = AxisBounds::from_curves(curves, plot)
        .with_context(|| format!("No data to plot for '{}'", performance))?;
    let size = (plot.width, plot.height);

    let is_svg = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    let result = if is_svg {
        let root = SVGBackend::new(output, size).into_drawing_area();
        draw_chart(&root, curves, performance, plot, bounds)
    } else {
        let root = BitMapBackend::new(output, size).into_drawing_area();
        draw_chart(&root, curves, performance, plot, bounds)
    };
    result.with_context(|| format!("Failed to render figure: {}", output.display()))
}

/// ±sd 区域的多边形顶点：上边界正序，下边界倒序
pub fn band_polygon(curve: &Curve) -> Vec<(f64, f64)> {
    curve
        .points
        .iter()
        .map(|p| (p.step, p.upper))
        .chain(curve.points.iter().rev().map(|p| (p.step, p.lower)))
        .collect()
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    curves: &[Curve],
    performance: &str,
    plot: &PlotConfig,
    bounds: AxisBounds,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = &plot.title {
        builder.caption(title, ("sans-serif", 28).into_font());
    }
    let mut chart = builder.build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)?;

    let sci = bounds.use_sci_notation(plot.sci_threshold);
    let x_formatter = |x: &f64| format_tick(*x, sci);
    chart
        .configure_mesh()
        .x_desc("steps")
        .y_desc(performance)
        .x_label_formatter(&x_formatter)
        .draw()?;

    for (i, curve) in curves.iter().enumerate() {
        let color = curve_color(i);

        // 先画 ±sd 区域，再画中心线
        chart.draw_series(std::iter::once(Polygon::new(
            band_polygon(curve),
            color.mix(plot.band_opacity).filled(),
        )))?;

        chart
            .draw_series(LineSeries::new(
                curve.points.iter().map(|p| (p.step, p.center)),
                ShapeStyle::from(&color).stroke_width(2),
            ))?
            .label(curve.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurvePoint;
    use tempfile::tempdir;

    fn sample_curves() -> Vec<Curve> {
        let points = |offset: f64| -> Vec<CurvePoint> {
            (0..5)
                .map(|i| {
                    let center = i as f64 + offset;
                    CurvePoint { step: i as f64 * 2000.0, center, lower: center - 0.5, upper: center + 0.5, samples: 2 }
                })
                .collect()
        };
        vec![
            Curve { label: "ppo".to_string(), points: points(0.0) },
            Curve { label: "sac".to_string(), points: points(1.0) },
        ]
    }

    #[test]
    fn test_band_polygon() {
        let curves = sample_curves();
        let band = band_polygon(&curves[0]);

        assert_eq!(band.len(), 10);
        assert_eq!(band[0], (0.0, 0.5));
        assert_eq!(band[4], (8000.0, 4.5));
        // 下边界从最后一个点往回走
        assert_eq!(band[5], (8000.0, 3.5));
        assert_eq!(band[9], (0.0, -0.5));
    }

    #[test]
    fn test_render_without_data_fails() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("empty.svg");
        assert!(render_figure(&[], "reward", &PlotConfig::default(), &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_curve_color_cycles() {
        assert_eq!(curve_color(0), curve_color(PALETTE.len()));
        assert_ne!(curve_color(0), curve_color(1));
    }
}
