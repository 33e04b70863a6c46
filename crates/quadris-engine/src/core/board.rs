use std::fmt;

use super::piece::{Piece, PieceKind, Position};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked block of a specific piece kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Returns the numeric cell value: `0` for empty, the kind id otherwise.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.id(),
        }
    }
}

/// A single row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardRow {
    cells: [Block; Board::WIDTH],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; Board::WIDTH],
    };

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// The 20×10 playing field holding locked blocks.
///
/// Row `0` is the top of the board. Every cell is either empty or holds the
/// kind of the piece locked there.
///
/// Out-of-range coordinates are never addressed: callers test
/// [`is_outside`](Self::is_outside) first, and [`is_empty`](Self::is_empty) and
/// [`lock`](Self::lock) assert the precondition.
///
/// # Example
///
/// ```
/// use quadris_engine::{Board, PieceKind, Position};
///
/// let mut board = Board::EMPTY;
/// for column in 0..10 {
///     board.lock(Position::new(19, column), PieceKind::I);
/// }
/// assert_eq!(board.clear_full_rows(), 1);
/// assert_eq!(board, Board::EMPTY);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; Board::HEIGHT],
    };

    /// Returns `true` if the position lies outside the board.
    #[must_use]
    #[expect(clippy::unused_self)]
    pub fn is_outside(&self, position: Position) -> bool {
        Self::index_of(position).is_none()
    }

    /// Returns `true` if the cell holds no locked block.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the board.
    #[must_use]
    pub fn is_empty(&self, position: Position) -> bool {
        let (row, column) = Self::expect_index(position);
        self.rows[row].cells[column].is_empty()
    }

    /// Returns `true` if every position is inside the board and empty.
    pub fn fits<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = Position>,
    {
        cells
            .into_iter()
            .all(|p| !self.is_outside(p) && self.is_empty(p))
    }

    /// Returns `true` if any cell of the piece is outside the board or occupied.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        !self.fits(piece.occupied_cells())
    }

    /// Writes a block of the given kind into the cell.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the board.
    pub fn lock(&mut self, position: Position, kind: PieceKind) {
        let (row, column) = Self::expect_index(position);
        self.rows[row].cells[column] = Block::Piece(kind);
    }

    /// Writes every cell of the piece with its kind.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for position in piece.occupied_cells() {
            self.lock(position, piece.kind());
        }
    }

    /// Returns the cell at the position, or `None` if outside the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Block> {
        Self::index_of(position).map(|(row, column)| self.rows[row].cells[column])
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; Board::WIDTH]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Returns the number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows()
            .flatten()
            .filter(|block| !block.is_empty())
            .count()
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Rows are visited once from bottom to top. A filled row increments the
    /// cleared counter; any other row drops by the number of rows cleared below
    /// it. The top `count` rows are emptied afterwards.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }

    fn index_of(position: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        (row < Self::HEIGHT && column < Self::WIDTH).then_some((row, column))
    }

    fn expect_index(position: Position) -> (usize, usize) {
        let Some(index) = Self::index_of(position) else {
            panic!("position {position:?} is outside the board");
        };
        index
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.rows() {
            write!(f, "    ")?;
            for block in row {
                let c = match block {
                    Block::Empty => '.',
                    Block::Piece(kind) => kind.as_char(),
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
