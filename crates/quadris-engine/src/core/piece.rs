use serde::{Deserialize, Serialize};

use super::shape::{ORIENTATION_COUNT, SHAPES, SPAWN_OFFSETS};

/// A live tetromino: kind, rotation index and position offset.
///
/// The occupied cells are recomputed from the rotation table on every call to
/// [`Piece::occupied_cells`] and never cached. Movement does no bounds checking;
/// callers validate the result against a [`Board`](super::Board).
///
/// # Example
///
/// ```
/// use quadris_engine::{Piece, PieceKind, Position};
///
/// let mut piece = Piece::new(PieceKind::T);
/// piece.translate(1, -1);
/// piece.rotate_forward();
///
/// assert_eq!(piece.offset(), Position::new(1, 2));
/// assert_eq!(piece.occupied_cells().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    offset: Position,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@row,column" (e.g., "T#1@4,3")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.offset.row,
            self.offset.column
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let s = String::deserialize(deserializer)?;

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| {
            D::Error::custom(format!("expected format 'kind#rotation@row,column', got '{s}'"))
        })?;
        let (rotation_str, offset_str) = rest.split_once('@').ok_or_else(|| {
            D::Error::custom(format!("missing '@' in '{s}'"))
        })?;
        let (row_str, column_str) = offset_str.split_once(',').ok_or_else(|| {
            D::Error::custom(format!("missing ',' in '{s}'"))
        })?;

        let mut kind_chars = kind_str.chars();
        let kind = match (kind_chars.next(), kind_chars.next()) {
            (Some(c), None) => PieceKind::from_char(c)
                .ok_or_else(|| D::Error::custom(format!("invalid piece kind: {c}")))?,
            _ => {
                return Err(D::Error::custom(format!(
                    "piece kind must be single character, got '{kind_str}'"
                )));
            }
        };

        let rotation = rotation_str
            .parse::<u8>()
            .map_err(|e| D::Error::custom(format!("invalid rotation: {rotation_str} ({e})")))?;
        if usize::from(rotation) >= ORIENTATION_COUNT {
            return Err(D::Error::custom(format!(
                "rotation must be 0-3, got {rotation}"
            )));
        }

        let row = row_str
            .parse::<i16>()
            .map_err(|e| D::Error::custom(format!("invalid row: {row_str} ({e})")))?;
        let column = column_str
            .parse::<i16>()
            .map_err(|e| D::Error::custom(format!("invalid column: {column_str} ({e})")))?;

        Ok(Piece {
            kind,
            rotation: PieceRotation(rotation),
            offset: Position::new(row, column),
        })
    }
}

impl Piece {
    /// Creates a piece at the spawn offset of its kind, in rotation 0.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: PieceRotation::default(),
            offset: SPAWN_OFFSETS[kind.index()],
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Returns the board cells covered by this piece.
    #[must_use]
    pub fn occupied_cells(&self) -> [Position; 4] {
        self.kind
            .orientation(self.rotation)
            .map(|cell| cell.offset_by(self.offset.row, self.offset.column))
    }

    pub fn translate(&mut self, delta_row: i16, delta_column: i16) {
        self.offset = self.offset.offset_by(delta_row, delta_column);
    }

    pub fn rotate_forward(&mut self) {
        self.rotation = self.rotation.rotated_forward();
    }

    /// Undoes one [`rotate_forward`](Self::rotate_forward).
    pub fn rotate_backward(&mut self) {
        self.rotation = self.rotation.rotated_backward();
    }

    #[must_use]
    pub fn translated(mut self, delta_row: i16, delta_column: i16) -> Self {
        self.translate(delta_row, delta_column);
        self
    }

    #[must_use]
    pub fn rotated_forward(mut self) -> Self {
        self.rotate_forward();
        self
    }
}

/// A `(row, column)` coordinate on the board grid.
///
/// Coordinates are signed so that a tentative piece position may lie outside
/// the board before it is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: i16,
    column: i16,
}

impl Position {
    #[must_use]
    pub const fn new(row: i16, column: i16) -> Self {
        Self { row, column }
    }

    #[must_use]
    pub const fn row(self) -> i16 {
        self.row
    }

    #[must_use]
    pub const fn column(self) -> i16 {
        self.column
    }

    #[must_use]
    pub const fn offset_by(self, delta_row: i16, delta_column: i16) -> Self {
        Self::new(self.row + delta_row, self.column + delta_column)
    }
}

/// Rotation index of a piece, `0..4`.
///
/// `0` is the spawn orientation; each step forward is a clockwise quarter turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[expect(clippy::cast_possible_truncation)]
    const COUNT: u8 = ORIENTATION_COUNT as u8;

    #[must_use]
    pub fn rotated_forward(self) -> Self {
        PieceRotation((self.0 + 1) % Self::COUNT)
    }

    #[must_use]
    pub fn rotated_backward(self) -> Self {
        PieceRotation((self.0 + Self::COUNT - 1) % Self::COUNT)
    }

    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }
}

/// The seven tetromino kinds.
///
/// The discriminant is the value stored in board cells for a locked block of
/// that kind; `0` is reserved for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// J-piece.
    J = 2,
    /// L-piece.
    L = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
    /// T-piece.
    T = 7,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Returns the board cell value of this kind (`1..=7`).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`id`](Self::id). Returns `None` for `0` and unknown values.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::Z),
            7 => Some(PieceKind::T),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize - 1
    }

    pub(crate) fn orientation(self, rotation: PieceRotation) -> [Position; 4] {
        SHAPES[self.index()][rotation.as_index()]
    }

    /// Returns the rotation-0 layout, normalized to its bounding box.
    ///
    /// Used for previews, where the spawn row offset is irrelevant.
    #[must_use]
    pub fn preview_cells(self) -> [Position; 4] {
        let cells = self.orientation(PieceRotation::default());
        let min_row = cells.iter().map(|p| p.row).min().unwrap_or(0);
        let min_column = cells.iter().map(|p| p.column).min().unwrap_or(0);
        cells.map(|p| p.offset_by(-min_row, -min_column))
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn all_pieces() -> impl Iterator<Item = Piece> {
        PieceKind::ALL.into_iter().flat_map(|kind| {
            (0..4).map(move |r| Piece {
                kind,
                rotation: PieceRotation(r),
                offset: Position::new(5, 4),
            })
        })
    }

    #[test]
    fn test_occupied_cells_are_four_distinct() {
        for piece in all_pieces() {
            let cells: HashSet<_> = piece.occupied_cells().into_iter().collect();
            assert_eq!(cells.len(), 4, "{piece:?}");
        }
    }

    #[test]
    fn test_occupied_cells_follow_offset() {
        let mut piece = Piece::new(PieceKind::O);
        assert_eq!(
            piece.occupied_cells(),
            [
                Position::new(0, 4),
                Position::new(0, 5),
                Position::new(1, 4),
                Position::new(1, 5),
            ]
        );

        piece.translate(3, -2);
        assert_eq!(
            piece.occupied_cells(),
            [
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(4, 2),
                Position::new(4, 3),
            ]
        );
    }

    #[test]
    fn test_i_piece_spawns_in_top_row() {
        let piece = Piece::new(PieceKind::I);
        assert_eq!(piece.offset(), Position::new(-1, 3));
        assert!(piece.occupied_cells().iter().all(|p| p.row() == 0));
    }

    #[test]
    fn test_rotate_forward_then_backward_restores_rotation() {
        for piece in all_pieces() {
            let mut rotated = piece;
            rotated.rotate_forward();
            rotated.rotate_backward();
            assert_eq!(rotated, piece);

            let mut rotated = piece;
            rotated.rotate_backward();
            rotated.rotate_forward();
            assert_eq!(rotated, piece);
        }
    }

    #[test]
    fn test_rotation_wraps_after_four_steps() {
        let mut piece = Piece::new(PieceKind::L);
        for expected in [1, 2, 3, 0] {
            piece.rotate_forward();
            assert_eq!(piece.rotation().as_index(), expected);
        }
        piece.rotate_backward();
        assert_eq!(piece.rotation().as_index(), 3);
    }

    #[test]
    fn test_o_piece_rotation_keeps_cells() {
        let piece = Piece::new(PieceKind::O);
        assert_eq!(piece.rotated_forward().occupied_cells(), piece.occupied_cells());
    }

    #[test]
    fn test_kind_id_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn test_preview_cells_start_at_origin() {
        assert_eq!(
            PieceKind::I.preview_cells(),
            [
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 3),
            ]
        );
        for kind in PieceKind::ALL {
            let cells = kind.preview_cells();
            assert_eq!(cells.iter().map(|p| p.row()).min(), Some(0));
            assert_eq!(cells.iter().map(|p| p.column()).min(), Some(0));
        }
    }

    #[test]
    fn test_piece_serialization() {
        let mut piece = Piece::new(PieceKind::T);
        piece.rotate_forward();
        piece.translate(4, 0);

        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"T#1@4,3\"");

        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_serialization_negative_row() {
        let piece = Piece::new(PieceKind::I);
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"I#0@-1,3\"");
        assert_eq!(serde_json::from_str::<Piece>(&serialized).unwrap(), piece);
    }

    #[test]
    fn test_piece_deserialization_error_cases() {
        assert!(serde_json::from_str::<Piece>("\"T1@4,3\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#1#4,3\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#1@4\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"X#1@4,3\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"TT#1@4,3\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#4@4,3\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#1@a,3\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#1@4,b\"").is_err());
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
