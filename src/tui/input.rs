use crate::models::KeybindingsConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// 输入处理器，负责将按键事件映射到应用操作
pub struct InputHandler {
    keybindings: KeybindingsConfig,
}

/// 用户操作类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAction {
    Quit,
    MoveUp,
    MoveDown,
    ToggleCurve,
    ToggleBand,
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    ResetView,
    None,
}

impl InputHandler {
    pub fn new(keybindings: KeybindingsConfig) -> Self {
        Self { keybindings }
    }

    /// 处理按键事件，返回对应的用户操作
    pub fn handle_key_event(&self, key_event: KeyEvent) -> UserAction {
        // 只处理按下事件，部分平台还会发送释放事件
        if key_event.kind == KeyEventKind::Release {
            return UserAction::None;
        }
        if key_event.code == KeyCode::Esc {
            return UserAction::Quit;
        }

        self.build_action_map()
            .iter()
            .find(|(binding, _)| key_matches(binding, key_event.code))
            .map(|(_, action)| *action)
            .unwrap_or(UserAction::None)
    }

    /// 构建操作映射表
    fn build_action_map(&self) -> [(&str, UserAction); 10] {
        [
            (self.keybindings.quit.as_str(), UserAction::Quit),
            (self.keybindings.up.as_str(), UserAction::MoveUp),
            (self.keybindings.down.as_str(), UserAction::MoveDown),
            (self.keybindings.toggle_curve.as_str(), UserAction::ToggleCurve),
            (self.keybindings.toggle_band.as_str(), UserAction::ToggleBand),
            (self.keybindings.zoom_in.as_str(), UserAction::ZoomIn),
            (self.keybindings.zoom_out.as_str(), UserAction::ZoomOut),
            (self.keybindings.pan_left.as_str(), UserAction::PanLeft),
            (self.keybindings.pan_right.as_str(), UserAction::PanRight),
            (self.keybindings.reset.as_str(), UserAction::ResetView),
        ]
    }
}

/// 配置中的按键名称是否与按键匹配
fn key_matches(binding: &str, code: KeyCode) -> bool {
    match binding {
        "up" => code == KeyCode::Up,
        "down" => code == KeyCode::Down,
        "left" => code == KeyCode::Left,
        "right" => code == KeyCode::Right,
        "space" => code == KeyCode::Char(' '),
        "enter" => code == KeyCode::Enter,
        "tab" => code == KeyCode::Tab,
        _ => {
            let mut chars = binding.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keybindings() {
        let input_handler = InputHandler::new(KeybindingsConfig::default());

        let cases = [
            (KeyCode::Char('q'), UserAction::Quit),
            (KeyCode::Esc, UserAction::Quit),
            (KeyCode::Up, UserAction::MoveUp),
            (KeyCode::Down, UserAction::MoveDown),
            (KeyCode::Char(' '), UserAction::ToggleCurve),
            (KeyCode::Char('b'), UserAction::ToggleBand),
            (KeyCode::Char('+'), UserAction::ZoomIn),
            (KeyCode::Char('-'), UserAction::ZoomOut),
            (KeyCode::Left, UserAction::PanLeft),
            (KeyCode::Right, UserAction::PanRight),
            (KeyCode::Char('r'), UserAction::ResetView),
            (KeyCode::Char('z'), UserAction::None),
            (KeyCode::Enter, UserAction::None),
        ];
        for (code, expected) in cases {
            assert_eq!(input_handler.handle_key_event(KeyEvent::from(code)), expected, "{:?}", code);
        }
    }

    #[test]
    fn test_custom_keybindings() {
        let keybindings = KeybindingsConfig {
            up: "k".to_string(),
            down: "j".to_string(),
            pan_left: "h".to_string(),
            pan_right: "l".to_string(),
            quit: "x".to_string(),
            ..KeybindingsConfig::default()
        };
        let input_handler = InputHandler::new(keybindings);

        assert_eq!(input_handler.handle_key_event(KeyEvent::from(KeyCode::Char('x'))), UserAction::Quit);
        assert_eq!(input_handler.handle_key_event(KeyEvent::from(KeyCode::Char('k'))), UserAction::MoveUp);
        assert_eq!(input_handler.handle_key_event(KeyEvent::from(KeyCode::Char('h'))), UserAction::PanLeft);
        // 方向键不再绑定
        assert_eq!(input_handler.handle_key_event(KeyEvent::from(KeyCode::Up)), UserAction::None);
        assert_eq!(input_handler.handle_key_event(KeyEvent::from(KeyCode::Char('q'))), UserAction::None);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let input_handler = InputHandler::new(KeybindingsConfig::default());
        let mut event = KeyEvent::from(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert_eq!(input_handler.handle_key_event(event), UserAction::None);
    }

    #[test]
    fn test_multi_char_binding_never_matches() {
        assert!(!key_matches("ab", KeyCode::Char('a')));
        assert!(!key_matches("", KeyCode::Char('a')));
    }
}
