//! A small screen-stack runtime on top of `ratatui` and `crossterm`.
//!
//! [`Runtime`] owns the event loop. It turns wall-clock time into tick and
//! render events and forwards terminal input to an [`App`]. [`ScreenStack`] is
//! an [`App`] that routes everything to the topmost [`Screen`] and applies the
//! [`ScreenTransition`] each screen returns.

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
