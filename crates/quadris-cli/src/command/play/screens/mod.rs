use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
};

pub(crate) use self::{
    game_over::GameOverScreen, how_to_play::HowToPlayScreen, menu::MenuScreen,
    paused::PausedScreen, playing::PlayingScreen,
};

mod game_over;
mod how_to_play;
mod menu;
mod paused;
mod playing;

/// Splits the frame into a centered main area and a one-line help area below it.
fn main_and_help_areas(frame: &Frame, main_height: u16) -> [Rect; 2] {
    Layout::vertical([Constraint::Length(main_height), Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(frame.area())
}

#[cfg(test)]
fn press(code: crossterm::event::KeyCode) -> crossterm::event::Event {
    use crossterm::event::{Event, KeyEvent, KeyModifiers};

    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}
