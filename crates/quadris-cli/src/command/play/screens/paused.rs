use std::{cell::Cell, rc::Rc, time::Duration};

use crossterm::event::{Event, KeyCode, KeyEvent};
use quadris_engine::GameSession;
use ratatui::Frame;
use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, Popup, SessionDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Resume,
    Retry,
    Menu,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Tab | KeyCode::Char('b' | 'B' | 'p' | 'P') => Some(Self::Resume),
            KeyCode::Char('r' | 'R') => Some(Self::Retry),
            KeyCode::Char('m' | 'M') => Some(Self::Menu),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["B", "Tab", "P"], "Resume"),
            (&["R"], "Retry"),
            (&["M"], "Main menu"),
        ]
    }
}

/// Shown on top of the playing screen while the game is paused.
#[derive(Debug)]
pub(crate) struct PausedScreen {
    snapshot: GameSession,
    play_time: Duration,
    retry_requested: Rc<Cell<bool>>,
}

impl PausedScreen {
    pub(crate) fn new(
        snapshot: GameSession,
        play_time: Duration,
        retry_requested: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            snapshot,
            play_time,
            retry_requested,
        }
    }
}

impl Screen for PausedScreen {
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
            Action::Resume => ScreenTransition::Pop,
            Action::Retry => {
                self.retry_requested.set(true);
                ScreenTransition::Pop
            }
            Action::Menu => ScreenTransition::PopToRoot,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let display = SessionDisplay::new(&self.snapshot, self.play_time).popup(Popup::Paused);
        let [main_area, help_area] = super::main_and_help_areas(frame, 22);
        frame.render_widget(display, main_area);
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}

#[cfg(test)]
mod tests {
    use quadris_engine::PieceSeed;

    use super::*;
    use crate::command::play::screens::press;

    fn paused() -> (PausedScreen, Rc<Cell<bool>>) {
        let retry = Rc::new(Cell::new(false));
        let session = GameSession::with_seed(PieceSeed::from_bytes([6; 16]));
        let screen = PausedScreen::new(session, Duration::ZERO, Rc::clone(&retry));
        (screen, retry)
    }

    #[test]
    fn test_resume_keys() {
        let (mut screen, retry) = paused();
        let mut runtime = Runtime::new();
        for code in [KeyCode::Char('b'), KeyCode::Tab, KeyCode::Char('p')] {
            assert!(matches!(
                screen.handle_event(&mut runtime, &press(code)),
                ScreenTransition::Pop
            ));
        }
        assert!(!retry.get());
    }

    #[test]
    fn test_retry_sets_flag() {
        let (mut screen, retry) = paused();
        let mut runtime = Runtime::new();
        assert!(matches!(
            screen.handle_event(&mut runtime, &press(KeyCode::Char('r'))),
            ScreenTransition::Pop
        ));
        assert!(retry.get());
    }

    #[test]
    fn test_menu_pops_to_root() {
        let (mut screen, _) = paused();
        let mut runtime = Runtime::new();
        assert!(matches!(
            screen.handle_event(&mut runtime, &press(KeyCode::Char('m'))),
            ScreenTransition::PopToRoot
        ));
    }
}
