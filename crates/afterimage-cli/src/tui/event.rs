use crossterm::event::Event as CrosstermEvent;

/// Events dispatched to the running application.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Game logic update timing (based on the tick interval).
    Tick,
    /// Screen render timing (dirty-driven).
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
