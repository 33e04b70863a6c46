use std::iter;

use quadris_engine::{Board, Piece, Position};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// The playing field with the falling piece and its landing preview.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<[Position; 4]>,
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            piece: None,
            block: None,
        }
    }

    pub fn ghost(self, cells: [Position; 4]) -> Self {
        Self {
            ghost: Some(cells),
            ..self
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Board::WIDTH as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::HEIGHT as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// What is drawn at `position`: the falling piece over the ghost over the board.
    fn display_at(&self, position: Position) -> BlockDisplay {
        if let Some(piece) = self.piece
            && piece.occupied_cells().contains(&position)
        {
            return BlockDisplay::piece(piece.kind());
        }
        if let Some(ghost) = self.ghost
            && ghost.contains(&position)
        {
            return BlockDisplay::ghost();
        }
        self.board
            .cell(position)
            .map_or(BlockDisplay::empty(true), |block| {
                BlockDisplay::from_block(block, true)
            })
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (row, grid_row) in iter::zip(0_i16.., grid_rows) {
            for (column, grid_cell) in iter::zip(0_i16.., grid_row) {
                let display = self.display_at(Position::new(row, column));
                display.render(grid_cell, buf);
            }
        }
    }
}
