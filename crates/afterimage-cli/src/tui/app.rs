use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for applications executed by [`Tui::run`].
pub trait App {
    /// Whether the application should exit after the current event.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: &Event);

    /// Draws the screen (called on each render event).
    fn draw(&self, frame: &mut Frame);

    /// Advances game logic by one tick.
    fn update(&mut self, tui: &mut Tui);
}
