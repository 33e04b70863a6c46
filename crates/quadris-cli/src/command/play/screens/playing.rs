use std::{cell::Cell, rc::Rc, time::Duration};

use crossterm::event::{Event, KeyCode, KeyEvent};
use quadris_engine::{DropOutcome, GameSession, GravityTimer};
use ratatui::Frame;
use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::{
    command::play::{
        context::SharedContext,
        screens::{GameOverScreen, PausedScreen},
    },
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

/// How long a status message stays under the board.
const STATUS_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Swap,
    Pause,
    Menu,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Self::MoveLeft),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Self::MoveRight),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Self::SoftDrop),
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Self::Rotate),
            KeyCode::Char(' ') => Some(Self::HardDrop),
            KeyCode::Char('c' | 'C') => Some(Self::Swap),
            KeyCode::Tab | KeyCode::Char('p' | 'P') => Some(Self::Pause),
            KeyCode::Char('q' | 'Q') => Some(Self::Menu),
            _ => None,
        }
    }
}

pub(super) fn bindings() -> &'static [KeyBinding<'static>] {
    &[
        (&["←", "A"], "Left"),
        (&["→", "D"], "Right"),
        (&["↓", "S"], "Soft drop"),
        (&["↑", "W"], "Rotate"),
        (&["Space"], "Hard drop"),
        (&["C"], "Swap next"),
        (&["Tab", "P"], "Pause"),
        (&["Q"], "Menu"),
    ]
}

#[derive(Debug)]
struct Status {
    text: String,
    remaining: Duration,
}

#[derive(Debug)]
pub(crate) struct PlayingScreen {
    context: SharedContext,
    session: GameSession,
    gravity: GravityTimer,
    play_time: Duration,
    status: Option<Status>,
    /// Set by the pause screen to restart the game when play resumes.
    retry_requested: Rc<Cell<bool>>,
}

impl PlayingScreen {
    pub(crate) fn new(context: SharedContext) -> Self {
        let session = context.borrow().new_session();
        Self::with_session(context, session)
    }

    fn with_session(context: SharedContext, session: GameSession) -> Self {
        Self {
            context,
            session,
            gravity: GravityTimer::new(),
            play_time: Duration::ZERO,
            status: None,
            retry_requested: Rc::new(Cell::new(false)),
        }
    }

    fn record(&self) {
        self.context
            .borrow_mut()
            .record(&self.session, self.play_time);
    }

    fn restart(&mut self) {
        self.record();
        self.session = self.context.borrow().new_session();
        self.gravity.reset();
        self.play_time = Duration::ZERO;
        self.status = None;
    }

    fn show_status(&mut self, text: String) {
        self.status = Some(Status {
            text,
            remaining: STATUS_DURATION,
        });
    }

    fn after_drop(&mut self, outcome: DropOutcome) {
        if !outcome.is_locked() {
            return;
        }
        // the next piece gets a full interval
        self.gravity.reset();
        match outcome.cleared_lines() {
            0 => {}
            1 => self.show_status("Cleared 1 line".to_owned()),
            n => self.show_status(format!("Cleared {n} lines")),
        }
    }

    fn apply(&mut self, action: Action) -> ScreenTransition {
        match action {
            Action::MoveLeft => _ = self.session.try_move_left(),
            Action::MoveRight => _ = self.session.try_move_right(),
            Action::SoftDrop => {
                if let Ok(outcome) = self.session.try_soft_drop() {
                    self.after_drop(outcome);
                }
            }
            Action::Rotate => {
                if self.session.try_rotate().is_ok() {
                    self.show_status("Rotated".to_owned());
                }
            }
            Action::HardDrop => {
                if let Ok(outcome) = self.session.hard_drop() {
                    self.after_drop(outcome);
                }
            }
            Action::Swap => _ = self.session.try_swap_with_next(),
            Action::Pause => {
                return ScreenTransition::Push(Box::new(PausedScreen::new(
                    self.session.clone(),
                    self.play_time,
                    Rc::clone(&self.retry_requested),
                )));
            }
            Action::Menu => return ScreenTransition::Pop,
        }
        self.check_game_over()
    }

    fn check_game_over(&self) -> ScreenTransition {
        if self.session.is_over() {
            ScreenTransition::Replace(Box::new(GameOverScreen::new(
                Rc::clone(&self.context),
                self.session.clone(),
                self.play_time,
            )))
        } else {
            ScreenTransition::Stay
        }
    }
}

impl Screen for PlayingScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        if self.retry_requested.replace(false) {
            self.restart();
        }
        let frame_rate = self.context.borrow().frame_rate();
        runtime.set_tick_rate(Some(frame_rate));
        runtime.set_render_mode(RenderMode::throttled_from_rate(frame_rate));
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {
        self.record();
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        match event
            .as_key_event()
            .and_then(|event| Action::from_key_event(&event))
        {
            Some(action) => self.apply(action),
            None => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) -> ScreenTransition {
        self.play_time += elapsed;
        if let Some(status) = &mut self.status {
            status.remaining = status.remaining.saturating_sub(elapsed);
            if status.remaining.is_zero() {
                self.status = None;
            }
        }

        if self.gravity.advance(elapsed, self.session.score())
            && let Ok(outcome) = self.session.try_soft_drop()
        {
            self.after_drop(outcome);
        }
        self.check_game_over()
    }

    fn draw(&self, frame: &mut Frame) {
        let display = SessionDisplay::new(&self.session, self.play_time)
            .status(self.status.as_ref().map(|status| status.text.as_str()));
        let [main_area, help_area] = super::main_and_help_areas(frame, 22);
        frame.render_widget(display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings()), help_area);
    }
}
