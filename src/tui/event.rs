use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::app::Result;

/// Everything the session loop reacts to. Resizes are delivered explicitly
/// because the session tracks viewport geometry for both visuals; the tick
/// is the poll timeout elapsing and drives the refresh countdown.
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) => return Ok(AppEvent::Key(key)),
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Commands a keypress resolves to. The same key can resolve differently per
/// mode; see [`KeybindingConfig`](crate::config::KeybindingConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    Select,
    Back,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    None,
}
