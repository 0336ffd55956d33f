use crate::models::KeybindingsConfig;
use crate::tui::{App, Event, EventHandler, InputHandler, Renderer};
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

/// TUI应用控制器，负责协调各个组件
pub struct TuiApp {
    app: App,
    input_handler: InputHandler,
    renderer: Renderer,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiApp {
    pub fn new(app: App, keybindings: KeybindingsConfig) -> Result<Self> {
        // 设置终端，失败时恢复原来的终端模式
        enable_raw_mode()?;
        let terminal = restore_on_error(init_terminal(), || {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)
        })?;

        Ok(Self {
            app,
            input_handler: InputHandler::new(keybindings),
            renderer: Renderer::new(),
            terminal,
        })
    }

    /// 运行TUI应用主循环
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        // 无论主循环是否出错都要恢复终端
        self.cleanup()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(self.app.state.config.tui.refresh_rate_ms);
        let events = EventHandler::new(tick_rate);

        while !self.app.should_quit {
            self.terminal.draw(|f| {
                self.renderer.draw(f, &mut self.app);
            })?;

            match events.next()? {
                Event::Input(key) => {
                    let action = self.input_handler.handle_key_event(key);
                    self.app.apply_action(action);
                }
                Event::Tick => {}
            }
        }
        Ok(())
    }

    // 清理终端设置
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// 初始化失败时执行 restore，并返回原始错误
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce() -> io::Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(err) = restore() {
            log::warn!("Failed to restore terminal: {}", err);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_on_setup_failure() {
        let restored = Cell::new(false);
        let result: Result<()> = restore_on_error(Err(anyhow::anyhow!("no tty")), || {
            restored.set(true);
            Ok(())
        });

        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }

    #[test]
    fn test_restore_skipped_on_success() {
        let restored = Cell::new(false);
        let result = restore_on_error(Ok(7), || {
            restored.set(true);
            Ok(())
        });

        assert!(!restored.get());
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_restore_failure_keeps_setup_error() {
        let result: Result<()> = restore_on_error(Err(anyhow::anyhow!("no tty")), || {
            Err(io::Error::other("still raw"))
        });
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }
}
