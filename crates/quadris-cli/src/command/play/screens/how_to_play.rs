use crossterm::event::{Event, KeyCode};
use quadris_engine::GameStats;
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Span, Text},
    widgets::{Block, Padding, Paragraph},
};
use ratatui_runtime::{RenderMode, Runtime, Screen, ScreenTransition};

use crate::{
    command::play::screens::playing,
    ui::widgets::{KeyBinding, KeyBindingDisplay, style},
};

const BINDINGS: &[KeyBinding<'static>] = &[(&["Backspace", "Esc"], "Back")];

#[derive(Debug, Default)]
pub(crate) struct HowToPlayScreen {}

impl HowToPlayScreen {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn text() -> Text<'static> {
        let mut lines = vec![Line::styled("CONTROLS", style::TITLE)];
        for (keys, description) in playing::bindings() {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<14}", keys.join(" / "))),
                Span::raw(*description),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::styled("SCORING", style::TITLE));
        for (lines_cleared, label) in [(1, "Single"), (2, "Double"), (3, "Triple"), (4, "Quad")] {
            lines.push(Line::raw(format!(
                "{label:<14}{:>5}",
                GameStats::score_for(lines_cleared)
            )));
        }
        lines.push(Line::default());
        lines.push(Line::raw("Pieces fall faster as the score grows."));
        Text::from(lines)
    }
}

impl Screen for HowToPlayScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        match event.as_key_event().map(|event| event.code) {
            Some(KeyCode::Backspace | KeyCode::Esc) => ScreenTransition::Pop,
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let text = Self::text();
        #[expect(clippy::cast_possible_truncation)]
        let height = text.lines.len() as u16 + 4;
        let [main_area, help_area] = super::main_and_help_areas(frame, height);
        let main_area = main_area.centered_horizontally(Constraint::Length(48));

        let help = Paragraph::new(text)
            .style(style::DEFAULT)
            .block(Block::bordered().title(" How to play ").padding(Padding::uniform(1)));
        frame.render_widget(help, main_area);
        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);
    }
}
