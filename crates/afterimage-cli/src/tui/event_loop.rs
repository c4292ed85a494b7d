use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces the tick / render / input event stream the runner dispatches.
///
/// Ticks fire at a fixed interval (the engine's logical tick); renders are
/// dirty-driven, so the screen redraws after every tick or terminal event
/// and otherwise sleeps in `event::poll`.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Returns the next event, blocking until a tick is due or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now.duration_since(self.last_tick) >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let next_tick_at = self.last_tick + self.tick_interval;
            let timeout = next_tick_at.saturating_duration_since(now);
            if !event::poll(timeout)? {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
