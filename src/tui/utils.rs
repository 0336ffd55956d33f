use crate::curves::{AxisBounds, CurvePoint, format_tick};
use ratatui::style::Color;

/// 将颜色字符串转换为ratatui的Color
pub fn parse_color(color_str: &str) -> Color {
    let color_map = get_color_map();
    color_map
        .get(&color_str.to_lowercase())
        .copied()
        .unwrap_or(Color::White)
}

/// 第 index 条曲线的颜色，按调色板循环
pub fn curve_color(palette: &[String], index: usize) -> Color {
    if palette.is_empty() {
        return Color::White;
    }
    parse_color(&palette[index % palette.len()])
}

/// 获取颜色映射表
fn get_color_map() -> std::collections::HashMap<String, Color> {
    use std::collections::HashMap;

    let mut map = HashMap::new();

    // 基础颜色
    insert_basic_colors(&mut map);

    // 灰色系
    insert_gray_colors(&mut map);

    // 亮色
    insert_light_colors(&mut map);

    map
}

fn insert_basic_colors(map: &mut std::collections::HashMap<String, Color>) {
    map.insert("black".to_string(), Color::Black);
    map.insert("red".to_string(), Color::Red);
    map.insert("green".to_string(), Color::Green);
    map.insert("yellow".to_string(), Color::Yellow);
    map.insert("blue".to_string(), Color::Blue);
    map.insert("magenta".to_string(), Color::Magenta);
    map.insert("cyan".to_string(), Color::Cyan);
    map.insert("white".to_string(), Color::White);
}

fn insert_gray_colors(map: &mut std::collections::HashMap<String, Color>) {
    map.insert("gray".to_string(), Color::Gray);
    map.insert("grey".to_string(), Color::Gray);
    map.insert("dark_gray".to_string(), Color::DarkGray);
    map.insert("dark_grey".to_string(), Color::DarkGray);
}

fn insert_light_colors(map: &mut std::collections::HashMap<String, Color>) {
    map.insert("light_red".to_string(), Color::LightRed);
    map.insert("light_green".to_string(), Color::LightGreen);
    map.insert("light_yellow".to_string(), Color::LightYellow);
    map.insert("light_blue".to_string(), Color::LightBlue);
    map.insert("light_magenta".to_string(), Color::LightMagenta);
    map.insert("light_cyan".to_string(), Color::LightCyan);
}

/// 取落在 x 范围内的点，`select` 决定取中心值还是区间边界
pub fn clip_points(
    points: &[CurvePoint],
    x_range: (f64, f64),
    select: fn(&CurvePoint) -> f64,
) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| p.step >= x_range.0 && p.step <= x_range.1)
        .map(|p| (p.step, select(p)))
        .filter(|(_, y)| y.is_finite())
        .collect()
}

/// 坐标轴标签：最小值、中点、最大值
pub fn axis_labels(range: (f64, f64), sci: bool) -> Vec<String> {
    let mid = (range.0 + range.1) / 2.0;
    [range.0, mid, range.1]
        .iter()
        .map(|v| format_tick(*v, sci))
        .collect()
}

/// 将可见范围缩放到原来的 factor 倍，中心不变，且不超出完整范围
pub fn zoom_range(view: (f64, f64), full: (f64, f64), factor: f64) -> (f64, f64) {
    let full_span = full.1 - full.0;
    let span = ((view.1 - view.0) * factor).min(full_span);
    let center = (view.0 + view.1) / 2.0;
    clamp_range((center - span / 2.0, center + span / 2.0), full)
}

/// 平移可见范围，offset 以当前宽度为单位
pub fn pan_range(view: (f64, f64), full: (f64, f64), offset: f64) -> (f64, f64) {
    let shift = (view.1 - view.0) * offset;
    clamp_range((view.0 + shift, view.1 + shift), full)
}

fn clamp_range(view: (f64, f64), full: (f64, f64)) -> (f64, f64) {
    let span = view.1 - view.0;
    if view.0 < full.0 {
        (full.0, full.0 + span)
    } else if view.1 > full.1 {
        (full.1 - span, full.1)
    } else {
        view
    }
}

/// 根据可见曲线与 x 范围计算 y 范围
pub fn y_range_in_view<'a, I>(points: I, x_range: (f64, f64), with_band: bool) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a CurvePoint>,
{
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        if p.step < x_range.0 || p.step > x_range.1 || !p.center.is_finite() {
            continue;
        }
        let (lo, hi) = if with_band { (p.lower, p.upper) } else { (p.center, p.center) };
        y = (y.0.min(lo), y.1.max(hi));
    }
    if !y.0.is_finite() {
        return None;
    }
    if y.1 > y.0 {
        Some(y)
    } else {
        Some((y.0 - 1.0, y.1 + 1.0))
    }
}

/// 视图的完整 x 范围和 y 范围
pub fn view_bounds(full: AxisBounds, x_range: (f64, f64), y_range: Option<(f64, f64)>) -> AxisBounds {
    AxisBounds {
        x: x_range,
        y: y_range.unwrap_or(full.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(step: f64, center: f64) -> CurvePoint {
        CurvePoint { step, center, lower: center - 1.0, upper: center + 1.0, samples: 2 }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color("light_blue"), Color::LightBlue);
        assert_eq!(parse_color("dark_grey"), Color::DarkGray);
        assert_eq!(parse_color("invalid"), Color::White); // 默认颜色
        assert_eq!(parse_color("RED"), Color::Red); // 测试大小写不敏感
    }

    #[test]
    fn test_curve_color_cycles() {
        let palette = vec!["cyan".to_string(), "yellow".to_string()];
        assert_eq!(curve_color(&palette, 0), Color::Cyan);
        assert_eq!(curve_color(&palette, 1), Color::Yellow);
        assert_eq!(curve_color(&palette, 2), Color::Cyan);
        assert_eq!(curve_color(&[], 3), Color::White);
    }

    #[test]
    fn test_clip_points() {
        let points = [point(0.0, 1.0), point(10.0, 2.0), point(20.0, 3.0)];
        assert_eq!(clip_points(&points, (5.0, 20.0), |p| p.center), vec![(10.0, 2.0), (20.0, 3.0)]);
        assert_eq!(clip_points(&points, (0.0, 0.0), |p| p.upper), vec![(0.0, 2.0)]);
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(axis_labels((0.0, 100.0), false), vec!["0", "50", "100"]);
        assert_eq!(axis_labels((0.0, 2e6), true), vec!["0.0e0", "1.0e6", "2.0e6"]);
    }

    #[test]
    fn test_zoom_range() {
        let full = (0.0, 100.0);
        assert_eq!(zoom_range(full, full, 0.5), (25.0, 75.0));
        assert_eq!(zoom_range((25.0, 75.0), full, 2.0), (0.0, 100.0));
        // 放大后的范围不会超出完整范围
        assert_eq!(zoom_range((0.0, 20.0), full, 2.0), (0.0, 40.0));
        assert_eq!(zoom_range(full, full, 4.0), full);
    }

    #[test]
    fn test_pan_range() {
        let full = (0.0, 100.0);
        assert_eq!(pan_range((25.0, 75.0), full, 0.25), (37.5, 87.5));
        assert_eq!(pan_range((25.0, 75.0), full, 1.0), (50.0, 100.0));
        assert_eq!(pan_range((25.0, 75.0), full, -1.0), (0.0, 50.0));
    }

    #[test]
    fn test_y_range_in_view() {
        let points = [point(0.0, 1.0), point(10.0, 5.0), point(20.0, 3.0)];
        assert_eq!(y_range_in_view(&points, (0.0, 20.0), true), Some((0.0, 6.0)));
        assert_eq!(y_range_in_view(&points, (0.0, 20.0), false), Some((1.0, 5.0)));
        assert_eq!(y_range_in_view(&points, (15.0, 20.0), false), Some((2.0, 4.0)));
        assert_eq!(y_range_in_view(&points, (30.0, 40.0), true), None);
    }
}
