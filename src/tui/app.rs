use crate::curves::{AxisBounds, Curve};
use crate::models::AppState;
use crate::tui::input::UserAction;
use crate::tui::utils::{pan_range, view_bounds, y_range_in_view, zoom_range};

const ZOOM_FACTOR: f64 = 0.5;
const PAN_STEP: f64 = 0.25;

/// TUI应用主结构
pub struct App {
    pub state: AppState,
    pub selected_curve_index: usize, // 图例中当前选中的曲线
    pub hidden: Vec<bool>,           // 每条曲线是否隐藏
    pub show_band: bool,             // 是否绘制 ±1 标准差区间
    pub view_x: Option<(f64, f64)>,  // 可见的 x 范围，None 表示完整范围
    pub should_quit: bool,
    pub legend_scroll_offset: usize, // 图例滚动偏移（由渲染器维护）
}

impl App {
    pub fn new(state: AppState) -> Self {
        let hidden = vec![false; state.curves.len()];
        let show_band = state.config.tui.show_band;
        Self {
            state,
            selected_curve_index: 0,
            hidden,
            show_band,
            view_x: None,
            should_quit: false,
            legend_scroll_offset: 0,
        }
    }

    /// 处理退出操作
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn apply_action(&mut self, action: UserAction) {
        match action {
            UserAction::Quit => self.quit(),
            UserAction::MoveUp => {
                self.selected_curve_index = self.selected_curve_index.saturating_sub(1);
            }
            UserAction::MoveDown => {
                if self.selected_curve_index + 1 < self.state.curves.len() {
                    self.selected_curve_index += 1;
                }
            }
            UserAction::ToggleCurve => {
                if let Some(hidden) = self.hidden.get_mut(self.selected_curve_index) {
                    *hidden = !*hidden;
                }
            }
            UserAction::ToggleBand => self.show_band = !self.show_band,
            UserAction::ZoomIn => self.rescale_view(ZOOM_FACTOR),
            UserAction::ZoomOut => self.rescale_view(1.0 / ZOOM_FACTOR),
            UserAction::PanLeft => self.pan_view(-PAN_STEP),
            UserAction::PanRight => self.pan_view(PAN_STEP),
            UserAction::ResetView => self.view_x = None,
            UserAction::None => {}
        }
    }

    fn rescale_view(&mut self, factor: f64) {
        if let Some(full) = self.full_bounds() {
            let view = self.view_x.unwrap_or(full.x);
            let zoomed = zoom_range(view, full.x, factor);
            self.view_x = if zoomed == full.x { None } else { Some(zoomed) };
        }
    }

    fn pan_view(&mut self, offset: f64) {
        if let (Some(view), Some(full)) = (self.view_x, self.full_bounds()) {
            self.view_x = Some(pan_range(view, full.x, offset));
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        !self.hidden.get(index).copied().unwrap_or(false)
    }

    /// 未被隐藏的曲线及其索引（索引用于确定颜色）
    pub fn visible_curves(&self) -> impl Iterator<Item = (usize, &Curve)> {
        self.state
            .curves
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_visible(*i))
    }

    /// 所有可见曲线的完整范围
    pub fn full_bounds(&self) -> Option<AxisBounds> {
        AxisBounds::from_curves(self.visible_curves().map(|(_, c)| c), &self.state.config.plot)
    }

    /// 当前视图范围：x 为缩放/平移后的范围，y 只按范围内的点计算
    pub fn view_bounds(&self) -> Option<AxisBounds> {
        let full = self.full_bounds()?;
        let Some(x) = self.view_x else {
            return Some(full);
        };
        let y = y_range_in_view(
            self.visible_curves().flat_map(|(_, c)| c.points.iter()),
            x,
            self.show_band,
        );
        Some(view_bounds(full, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurvePoint;
    use crate::models::{Condition, Config, Estimator};

    fn curve(label: &str, points: &[(f64, f64)]) -> Curve {
        Curve {
            label: label.to_string(),
            points: points
                .iter()
                .map(|&(step, center)| CurvePoint {
                    step,
                    center,
                    lower: center - 1.0,
                    upper: center + 1.0,
                    samples: 2,
                })
                .collect(),
        }
    }

    fn sample_app() -> App {
        let state = AppState {
            performance: "reward".to_string(),
            curves: vec![
                curve("ppo", &[(0.0, 1.0), (50.0, 2.0), (100.0, 3.0)]),
                curve("sac", &[(0.0, 10.0), (100.0, 20.0)]),
            ],
            condition: Condition::GroupKey,
            estimator: Estimator::Mean,
            config: Config::default(),
        };
        App::new(state)
    }

    #[test]
    fn test_selection_stays_in_range() {
        let mut app = sample_app();
        app.apply_action(UserAction::MoveUp);
        assert_eq!(app.selected_curve_index, 0);
        app.apply_action(UserAction::MoveDown);
        app.apply_action(UserAction::MoveDown);
        assert_eq!(app.selected_curve_index, 1);
    }

    #[test]
    fn test_toggle_curve_changes_bounds() {
        let mut app = sample_app();
        assert_eq!(app.full_bounds().unwrap().y, (0.0, 21.0));

        app.apply_action(UserAction::MoveDown);
        app.apply_action(UserAction::ToggleCurve);
        assert!(!app.is_visible(1));
        assert_eq!(app.visible_curves().count(), 1);
        assert_eq!(app.full_bounds().unwrap().y, (0.0, 4.0));

        app.apply_action(UserAction::ToggleCurve);
        assert_eq!(app.visible_curves().count(), 2);
    }

    #[test]
    fn test_all_hidden_has_no_bounds() {
        let mut app = sample_app();
        app.hidden = vec![true, true];
        assert!(app.full_bounds().is_none());
        assert!(app.view_bounds().is_none());
        // 没有数据时缩放不生效
        app.apply_action(UserAction::ZoomIn);
        assert_eq!(app.view_x, None);
    }

    #[test]
    fn test_zoom_pan_reset() {
        let mut app = sample_app();
        app.apply_action(UserAction::ZoomIn);
        assert_eq!(app.view_x, Some((25.0, 75.0)));

        app.apply_action(UserAction::PanRight);
        assert_eq!(app.view_x, Some((37.5, 87.5)));
        app.apply_action(UserAction::PanRight);
        app.apply_action(UserAction::PanRight);
        assert_eq!(app.view_x, Some((50.0, 100.0)));

        app.apply_action(UserAction::ZoomOut);
        assert_eq!(app.view_x, None);

        app.apply_action(UserAction::ZoomIn);
        app.apply_action(UserAction::ResetView);
        assert_eq!(app.view_x, None);
    }

    #[test]
    fn test_pan_without_zoom_does_nothing() {
        let mut app = sample_app();
        app.apply_action(UserAction::PanLeft);
        assert_eq!(app.view_x, None);
    }

    #[test]
    fn test_view_bounds_uses_points_in_window() {
        let mut app = sample_app();
        app.hidden = vec![false, true];
        app.view_x = Some((40.0, 100.0));
        let bounds = app.view_bounds().unwrap();
        assert_eq!(bounds.x, (40.0, 100.0));
        assert_eq!(bounds.y, (1.0, 4.0));

        app.apply_action(UserAction::ToggleBand);
        assert!(!app.show_band);
        assert_eq!(app.view_bounds().unwrap().y, (2.0, 3.0));
    }

    #[test]
    fn test_quit() {
        let mut app = sample_app();
        app.apply_action(UserAction::Quit);
        assert!(app.should_quit);
    }
}
