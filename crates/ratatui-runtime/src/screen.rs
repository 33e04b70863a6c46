use std::{fmt, time::Duration};

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime};

/// One screen of the application, such as a menu or the game board.
///
/// # Lifecycle
///
/// ```text
/// new
///  ↓
/// on_active() ←──────────┐
///  ↓                     │ screen above is popped
/// (foreground)           │
///  ↓                     │
/// on_inactive() ─────────┘ screen pushed on top
///  ↓
/// on_close()   removed by Pop, PopToRoot, Replace or Exit
/// ```
///
/// Screens configure the [`Runtime`] (tick rate, render mode) in
/// [`on_active`](Self::on_active), so returning to a screen restores its timing.
///
/// ```
/// use std::time::Duration;
///
/// use crossterm::event::Event;
/// use ratatui::Frame;
/// use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};
///
/// #[derive(Debug)]
/// struct Clock {
///     elapsed: Duration,
/// }
///
/// impl Screen for Clock {
///     fn on_active(&mut self, runtime: &mut Runtime) {
///         runtime.set_tick_rate(Some(10.0));
///         runtime.set_render_mode(RenderMode::throttled_from_rate(10.0));
///     }
///
///     fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
///         ScreenTransition::Pop
///     }
///
///     fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) -> ScreenTransition {
///         self.elapsed += elapsed;
///         ScreenTransition::Stay
///     }
///
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
pub trait Screen: fmt::Debug {
    /// Called when the screen comes to the foreground: on start-up, when pushed,
    /// and when the screen above it is removed.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// Called when the screen leaves the foreground, either because another
    /// screen is pushed on top or because it is being removed.
    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    /// Called after [`on_inactive`](Self::on_inactive) when the screen is removed
    /// from the stack. Not called on push.
    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// Advances the screen by `elapsed`. Called on every tick.
    fn update(&mut self, _runtime: &mut Runtime, _elapsed: Duration) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame);
}

/// What the stack does after a screen handled an event or tick.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Pushes a screen on top; the current one goes to the background.
    Push(Box<dyn Screen>),
    /// Removes the current screen and reactivates the one below.
    Pop,
    /// Removes every screen above the bottom one and reactivates it.
    PopToRoot,
    /// Removes the current screen and activates the given one in its place.
    Replace(Box<dyn Screen>),
    /// Removes every screen and ends the run.
    Exit,
}

/// An [`App`] that forwards everything to the topmost [`Screen`].
///
/// The run ends once the stack is empty.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    /// Number of screens on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }

    fn activate_top(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                self.activate_top(runtime);
            }
            ScreenTransition::PopToRoot => {
                if self.screens.len() > 1 {
                    while self.screens.len() > 1 {
                        self.close_top(runtime);
                    }
                    self.activate_top(runtime);
                }
            }
            ScreenTransition::Replace(mut screen) => {
                self.close_top(runtime);
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        self.activate_top(runtime);
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.update(runtime, elapsed);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }
}
