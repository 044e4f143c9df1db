use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The current piece should fall one row (based on `drop_interval`).
    DropTick,
    /// Screen render timing (based on `frame_interval`).
    Frame,
    /// Terminal events such as key input, mouse, and resize.
    Terminal(CrosstermEvent),
}
