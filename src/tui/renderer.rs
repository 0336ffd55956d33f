use crate::curves::CurvePoint;
use crate::tui::App;
use crate::tui::utils::{axis_labels, clip_points, curve_color};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph},
};

/// TUI渲染器，负责处理所有UI渲染逻辑
pub struct Renderer;

/// 一条曲线在图表中的数据：中心线以及区间上下边界
struct CurveData {
    color: Color,
    center: Vec<(f64, f64)>,
    lower: Vec<(f64, f64)>,
    upper: Vec<(f64, f64)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// 从app结构体中读取数据并渲染
    pub fn draw(&self, f: &mut Frame, app: &mut App) {
        let legend_proportion = app.state.config.tui.legend_panel_proportion.clamp(10, 90);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Percentage(100 - legend_proportion),
                Constraint::Percentage(legend_proportion),
            ])
            .split(f.area());

        self.draw_chart(f, app, chunks[0]);
        self.draw_legend(f, app, chunks[1]);
    }

    /// 绘制曲线图
    fn draw_chart(&self, f: &mut Frame, app: &App, area: Rect) {
        let title = format!(
            "{} ({} by {})",
            app.state.performance(),
            app.state.estimator,
            app.state.condition.column_name()
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let Some(bounds) = app.view_bounds() else {
            let empty = Paragraph::new("No curves to display")
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        };

        let palette = &app.state.config.tui.palette;
        let curve_data: Vec<CurveData> = app
            .visible_curves()
            .map(|(index, curve)| CurveData {
                color: curve_color(palette, index),
                center: clip_points(&curve.points, bounds.x, |p: &CurvePoint| p.center),
                lower: clip_points(&curve.points, bounds.x, |p: &CurvePoint| p.lower),
                upper: clip_points(&curve.points, bounds.x, |p: &CurvePoint| p.upper),
            })
            .collect();

        let mut datasets = Vec::new();
        for data in &curve_data {
            if app.show_band {
                let band_style = Style::default().fg(data.color).add_modifier(Modifier::DIM);
                for edge in [&data.lower, &data.upper] {
                    datasets.push(
                        ChartDataset::default()
                            .marker(symbols::Marker::Braille)
                            .graph_type(GraphType::Line)
                            .style(band_style)
                            .data(edge),
                    );
                }
            }
            datasets.push(
                ChartDataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(data.color))
                    .data(&data.center),
            );
        }

        let sci = bounds.use_sci_notation(app.state.config.plot.sci_threshold);
        let chart = Chart::new(datasets)
            .block(block)
            .legend_position(None)
            .x_axis(
                Axis::default()
                    .title("steps")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([bounds.x.0, bounds.x.1])
                    .labels(axis_labels(bounds.x, sci)),
            )
            .y_axis(
                Axis::default()
                    .title(app.state.performance().to_string())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([bounds.y.0, bounds.y.1])
                    .labels(axis_labels(bounds.y, false)),
            );

        f.render_widget(chart, area);
    }

    /// 绘制图例面板
    fn draw_legend(&self, f: &mut Frame, app: &mut App, area: Rect) {
        let block = Block::default()
            .title(self.generate_legend_title(app))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if app.state.curves.is_empty() {
            let empty = Paragraph::new("No curves found")
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        // 留出一行显示按键提示
        let visible_rows = area.height.saturating_sub(3).max(1) as usize;
        let scroll_offset =
            calculate_scroll_offset(app.selected_curve_index, visible_rows, app.legend_scroll_offset);
        app.legend_scroll_offset = scroll_offset;

        let palette = &app.state.config.tui.palette;
        let mut lines: Vec<Line> = app
            .state
            .curves
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_rows)
            .map(|(index, curve)| {
                let visible = app.is_visible(index);
                let marker = if visible { "[x] " } else { "[ ] " };
                let mut label_style = Style::default().fg(curve_color(palette, index));
                if !visible {
                    label_style = label_style.add_modifier(Modifier::DIM);
                }
                if index == app.selected_curve_index {
                    label_style = label_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(curve.label.clone(), label_style),
                ])
            })
            .collect();

        lines.push(Line::from(Span::styled(
            self.generate_help_line(app),
            Style::default().fg(Color::DarkGray),
        )));

        let legend = Paragraph::new(lines).block(block).alignment(Alignment::Left);
        f.render_widget(legend, area);
    }

    /// 生成图例标题
    fn generate_legend_title(&self, app: &App) -> String {
        let total = app.state.curves.len();
        let shown = app.visible_curves().count();
        format!("{} [{}/{}]", app.state.condition.column_name(), shown, total)
    }

    fn generate_help_line(&self, app: &App) -> String {
        let keys = &app.state.config.keybindings;
        format!(
            "{} toggle  {} band  {}/{} zoom  {} reset  {} quit",
            keys.toggle_curve, keys.toggle_band, keys.zoom_in, keys.zoom_out, keys.reset, keys.quit
        )
    }
}

/// 保证选中项处于可见范围内
fn calculate_scroll_offset(selected: usize, visible_rows: usize, current_offset: usize) -> usize {
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_rows {
        selected + 1 - visible_rows
    } else {
        current_offset
    }
}
