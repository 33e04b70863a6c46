use super::piece::{PieceKind, Position};

/// Cell offsets of a single orientation, relative to the piece origin.
pub(crate) type Orientation = [Position; 4];

/// Number of stored orientations per piece kind.
///
/// The O-piece repeats its single layout so every kind indexes the same way.
pub(crate) const ORIENTATION_COUNT: usize = 4;

const fn orientation(cells: [(i16, i16); 4]) -> Orientation {
    let mut out = [Position::new(0, 0); 4];
    let mut i = 0;
    while i < 4 {
        out[i] = Position::new(cells[i].0, cells[i].1);
        i += 1;
    }
    out
}

/// Rotation table indexed by `[kind index][rotation]`.
///
/// Offsets are `(row, column)`, row growing downward. Rotation index `n + 1` is
/// the clockwise rotation of index `n`.
pub(crate) const SHAPES: [[Orientation; ORIENTATION_COUNT]; PieceKind::LEN] = [
    // I-piece
    [
        orientation([(1, 0), (1, 1), (1, 2), (1, 3)]),
        orientation([(0, 2), (1, 2), (2, 2), (3, 2)]),
        orientation([(2, 0), (2, 1), (2, 2), (2, 3)]),
        orientation([(0, 1), (1, 1), (2, 1), (3, 1)]),
    ],
    // J-piece
    [
        orientation([(0, 0), (1, 0), (1, 1), (1, 2)]),
        orientation([(0, 1), (0, 2), (1, 1), (2, 1)]),
        orientation([(1, 0), (1, 1), (1, 2), (2, 2)]),
        orientation([(0, 1), (1, 1), (2, 0), (2, 1)]),
    ],
    // L-piece
    [
        orientation([(0, 2), (1, 0), (1, 1), (1, 2)]),
        orientation([(0, 1), (1, 1), (2, 1), (2, 2)]),
        orientation([(1, 0), (1, 1), (1, 2), (2, 0)]),
        orientation([(0, 0), (0, 1), (1, 1), (2, 1)]),
    ],
    // O-piece
    [
        orientation([(0, 0), (0, 1), (1, 0), (1, 1)]),
        orientation([(0, 0), (0, 1), (1, 0), (1, 1)]),
        orientation([(0, 0), (0, 1), (1, 0), (1, 1)]),
        orientation([(0, 0), (0, 1), (1, 0), (1, 1)]),
    ],
    // S-piece
    [
        orientation([(0, 1), (0, 2), (1, 0), (1, 1)]),
        orientation([(0, 1), (1, 1), (1, 2), (2, 2)]),
        orientation([(1, 1), (1, 2), (2, 0), (2, 1)]),
        orientation([(0, 0), (1, 0), (1, 1), (2, 1)]),
    ],
    // Z-piece
    [
        orientation([(0, 0), (0, 1), (1, 1), (1, 2)]),
        orientation([(0, 2), (1, 1), (1, 2), (2, 1)]),
        orientation([(1, 0), (1, 1), (2, 1), (2, 2)]),
        orientation([(0, 1), (1, 0), (1, 1), (2, 0)]),
    ],
    // T-piece
    [
        orientation([(0, 1), (1, 0), (1, 1), (1, 2)]),
        orientation([(0, 1), (1, 1), (1, 2), (2, 1)]),
        orientation([(1, 0), (1, 1), (1, 2), (2, 1)]),
        orientation([(0, 1), (1, 0), (1, 1), (2, 1)]),
    ],
];

/// Spawn offset of each kind, placing the rotation-0 layout in the top rows
/// and horizontally centered.
pub(crate) const SPAWN_OFFSETS: [Position; PieceKind::LEN] = [
    Position::new(-1, 3), // I
    Position::new(0, 3),  // J
    Position::new(0, 3),  // L
    Position::new(0, 4),  // O
    Position::new(0, 3),  // S
    Position::new(0, 3),  // Z
    Position::new(0, 3),  // T
];
