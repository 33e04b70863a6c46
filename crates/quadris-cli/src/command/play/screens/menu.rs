use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Padding, Paragraph},
};
use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::{
    command::play::{
        context::SharedContext,
        screens::{HowToPlayScreen, PlayingScreen},
    },
    ui::widgets::{KeyBinding, KeyBindingDisplay, style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Play,
    HowToPlay,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Enter => Some(Self::Play),
            KeyCode::Char('h' | 'H') => Some(Self::HowToPlay),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["Enter"], "Play"),
            (&["H"], "How to play"),
            (&["Q", "Esc"], "Quit"),
        ]
    }
}

#[derive(Debug)]
pub(crate) struct MenuScreen {
    context: SharedContext,
}

impl MenuScreen {
    pub(crate) fn new(context: SharedContext) -> Self {
        Self { context }
    }
}

impl Screen for MenuScreen {
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
            Action::Play => {
                ScreenTransition::Push(Box::new(PlayingScreen::new(Rc::clone(&self.context))))
            }
            Action::HowToPlay => ScreenTransition::Push(Box::new(HowToPlayScreen::new())),
            Action::Quit => ScreenTransition::Exit,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let context = self.context.borrow();
        let mut lines = vec![
            Line::styled("Q U A D R I S", style::TITLE),
            Line::default(),
            Line::from("Press Enter to start"),
        ];
        if let Some(best) = context.best_score() {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("Best score: {best} ({} games)", context.games_played()),
                style::MUTED,
            ));
        }

        let [main_area, help_area] = super::main_and_help_areas(frame, 9);
        let main_area = main_area.centered_horizontally(Constraint::Length(40));
        let menu = Paragraph::new(Text::from(lines).centered())
            .style(style::DEFAULT)
            .block(Block::bordered().padding(Padding::vertical(1)));

        frame.render_widget(menu, main_area);
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::command::play::{context::PlayContext, screens::press};

    fn menu() -> MenuScreen {
        MenuScreen::new(PlayContext::shared(60.0, None))
    }

    #[test]
    fn test_key_mapping() {
        let mut screen = menu();
        let mut runtime = Runtime::new();
        assert!(matches!(
            screen.handle_event(&mut runtime, &press(KeyCode::Enter)),
            ScreenTransition::Push(_)
        ));
        assert!(matches!(
            screen.handle_event(&mut runtime, &press(KeyCode::Char('h'))),
            ScreenTransition::Push(_)
        ));
        assert!(matches!(
            screen.handle_event(&mut runtime, &press(KeyCode::Esc)),
            ScreenTransition::Exit
        ));
        assert!(matches!(
            screen.handle_event(&mut runtime, &press(KeyCode::Char('x'))),
            ScreenTransition::Stay
        ));
    }

    #[test]
    fn test_menu_stops_ticks() {
        let mut screen = menu();
        let mut runtime = Runtime::new();
        runtime.set_tick_interval(Some(Duration::from_millis(16)));
        screen.on_active(&mut runtime);
        assert_eq!(runtime.tick_interval(), None);
    }
}
