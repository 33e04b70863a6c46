use std::iter;

use quadris_engine::{PieceKind, Position};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// Preview of a single piece in its spawn orientation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
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

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Columns and rows spanned by the preview layout.
fn preview_size(cells: &[Position; 4]) -> (u16, u16) {
    let extent = |f: fn(&Position) -> i16| {
        cells
            .iter()
            .map(f)
            .max()
            .and_then(|max| u16::try_from(max + 1).ok())
            .unwrap_or(0)
    };
    (extent(|p| p.column()), extent(|p| p.row()))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_block = BlockDisplay::empty(false);
        let Some(piece) = self.piece else {
            for y in area.rows() {
                Widget::render(&empty_block, y, buf);
            }
            return;
        };

        let cells = piece.preview_cells();
        let (columns, rows) = preview_size(&cells);
        let piece_area = area.centered(
            Constraint::Length(columns * BlockDisplay::width()),
            Constraint::Length(rows * BlockDisplay::height()),
        );

        let horizontal = Layout::horizontal(
            (0..columns).map(|_| Constraint::Length(BlockDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..rows).map(|_| Constraint::Length(BlockDisplay::height())));
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::piece(piece);
        for (row, grid_row) in iter::zip(0_i16.., grid_rows) {
            for (column, grid_cell) in iter::zip(0_i16.., grid_row) {
                let display = if cells.contains(&Position::new(row, column)) {
                    &occupied_block
                } else {
                    &empty_block
                };
                Widget::render(display, grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_size() {
        assert_eq!(preview_size(&PieceKind::I.preview_cells()), (4, 1));
        assert_eq!(preview_size(&PieceKind::O.preview_cells()), (2, 2));
        assert_eq!(preview_size(&PieceKind::T.preview_cells()), (3, 2));
    }

    #[test]
    fn test_render_centers_piece() {
        let display = PieceDisplay::new().piece(PieceKind::O);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        // The 2x2 O occupies the middle four terminal columns of both rows.
        for y in 0..2 {
            for x in 0..8 {
                let filled = buf[(x, y)].bg == crate::ui::widgets::color::YELLOW;
                assert_eq!(filled, (2..6).contains(&x), "cell ({x}, {y})");
            }
        }
    }
}
