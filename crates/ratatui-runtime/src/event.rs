use std::time::Duration;

use crossterm::event::Event;

/// Events produced by the [`EventLoop`](crate::event_loop::EventLoop).
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(crate) enum LoopEvent {
    /// Logic step, carrying the time elapsed since the previous step.
    #[from(ignore)]
    Tick(Duration),
    /// The screen should be redrawn.
    Render,
    /// Key input, resize and other terminal events.
    Terminal(Event),
}
