use crossterm::event::{self, Event as CEvent, KeyEvent};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

pub enum Event {
    Input(KeyEvent),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            Self::event_loop(tx, tick_rate);
        });

        EventHandler { rx, _tx }
    }

    /// 事件循环处理函数，终端读取失败或接收端关闭时退出
    fn event_loop(tx: mpsc::Sender<Event>, tick_rate: Duration) {
        let mut last_tick = Instant::now();

        loop {
            let timeout = Self::calculate_timeout(tick_rate, last_tick);

            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(CEvent::Key(key)) => {
                        if tx.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        log::warn!("Failed to read terminal event: {}", err);
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    log::warn!("Failed to poll terminal events: {}", err);
                    break;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(Event::Tick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
        }
    }

    /// 计算超时时间
    fn calculate_timeout(tick_rate: Duration, last_tick: Instant) -> Duration {
        tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0))
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_timeout() {
        let tick_rate = Duration::from_millis(250);
        assert!(EventHandler::calculate_timeout(tick_rate, Instant::now()) <= tick_rate);

        let long_ago = Instant::now() - Duration::from_secs(1);
        assert_eq!(EventHandler::calculate_timeout(tick_rate, long_ago), Duration::ZERO);
    }
}
