use std::{rc::Rc, time::Duration};

use crossterm::event::{Event, KeyCode, KeyEvent};
use quadris_engine::GameSession;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};
use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::{
    command::play::{context::SharedContext, screens::PlayingScreen},
    ui::widgets::{KeyBinding, KeyBindingDisplay, Popup, SessionDisplay, style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Retry,
    Menu,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char('r' | 'R') => Some(Self::Retry),
            KeyCode::Char('m' | 'M') | KeyCode::Esc => Some(Self::Menu),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[(&["R"], "Retry"), (&["M", "Esc"], "Main menu")]
    }
}

#[derive(Debug)]
pub(crate) struct GameOverScreen {
    context: SharedContext,
    final_session: GameSession,
    play_time: Duration,
}

impl GameOverScreen {
    pub(crate) fn new(context: SharedContext, final_session: GameSession, play_time: Duration) -> Self {
        Self {
            context,
            final_session,
            play_time,
        }
    }
}

impl Screen for GameOverScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(action) = event
            .as_key_event()
            .and_then(|event| Action::from_key_event(&event))
        else {
            return ScreenTransition::Stay;
        };
        match action {
            Action::Retry => {
                ScreenTransition::Replace(Box::new(PlayingScreen::new(Rc::clone(&self.context))))
            }
            Action::Menu => ScreenTransition::Pop,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let score = self.final_session.score();
        let best = self.context.borrow().best_score().unwrap_or(score);
        let summary = Line::styled(
            format!("Final score: {score}   Best: {best}"),
            style::TITLE,
        )
        .centered();

        let display = SessionDisplay::new(&self.final_session, self.play_time).popup(Popup::GameOver);
        let [main_area, help_area] = super::main_and_help_areas(frame, 24);
        let [board_area, summary_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(2)]).areas(main_area);
        frame.render_widget(display, board_area);
        frame.render_widget(summary, summary_area);
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}
