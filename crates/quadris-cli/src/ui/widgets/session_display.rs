use std::time::Duration;

use quadris_engine::GameSession;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Overlay drawn over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Paused,
    GameOver,
}

impl Popup {
    fn text(self) -> &'static str {
        match self {
            Popup::Paused => "PAUSED",
            Popup::GameOver => "GAME OVER!!",
        }
    }

    fn style(self) -> Style {
        match self {
            Popup::Paused => Style::new().fg(color::BLACK).bg(color::YELLOW),
            Popup::GameOver => Style::new().fg(color::WHITE).bg(color::RED),
        }
    }

    fn border_color(popup: Option<Self>) -> Color {
        match popup {
            None => color::WHITE,
            Some(Popup::Paused) => color::YELLOW,
            Some(Popup::GameOver) => color::RED,
        }
    }
}

/// Board, next piece and statistics of a session side by side.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    play_time: Duration,
    status: Option<&'a str>,
    popup: Option<Popup>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, play_time: Duration) -> Self {
        Self {
            session,
            play_time,
            status: None,
            popup: None,
        }
    }

    /// Short message shown under the board.
    pub fn status(self, status: Option<&'a str>) -> Self {
        Self { status, ..self }
    }

    pub fn popup(self, popup: Popup) -> Self {
        Self {
            popup: Some(popup),
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(1, 0);
        let border_style = Popup::border_color(self.popup);
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = {
            let mut board_block = Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT);
            if let Some(status) = self.status {
                board_block = board_block.title_bottom(Line::from(status).centered());
            }
            let widget = BoardDisplay::new(self.session.board()).block(board_block);
            // A finished session has no falling piece worth showing.
            if self.session.is_over() {
                widget
            } else {
                widget
                    .ghost(self.session.ghost_cells())
                    .piece(*self.session.current_piece())
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece().kind())
            .block(panel("NEXT"));
        let stats_panel =
            StatsDisplay::new(self.session.stats(), self.play_time).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_panel.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let board_width = game_board.width();
        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some(popup) = self.popup {
            let style = popup.style();
            let block = Block::new().style(style);
            let text = Text::styled(popup.text(), style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
