use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Owns the event loop and drives applications that implement [`App`] at a
/// fixed tick rate.
#[derive(Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    /// Creates a runtime ticking at `rate` Hz.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            events: EventLoop::new(Duration::from_secs_f64(1.0 / rate)),
        }
    }

    /// Runs the application until it asks to exit.
    ///
    /// - `Tick`: calls `app.update()`
    /// - `Render`: calls `app.draw()`
    /// - `Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => {
                        app.update(&mut self);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, &event);
                    }
                }
            }
            Ok(())
        })
    }
}
