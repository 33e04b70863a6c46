use rand::Rng as _;

use crate::{
    ActionError, PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, Position},
    },
};

use super::{
    game_stats::GameStats,
    piece_bag::{PieceBag, PieceSeed},
};

/// Whether the session accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Active,
    /// A freshly spawned piece did not fit. Only a reset leaves this state.
    Over,
}

/// Result of locking the current piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LockOutcome {
    /// The next piece spawned; the number of rows cleared (possibly zero).
    Cleared(usize),
    /// The next piece did not fit and the session is over. No rows were cleared.
    ToppedOut,
}

/// Result of a downward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece landed and was locked.
    Locked(LockOutcome),
}

impl DropOutcome {
    /// Rows cleared by this drop, `0` if nothing was cleared.
    #[must_use]
    pub fn cleared_lines(self) -> usize {
        match self {
            DropOutcome::Locked(LockOutcome::Cleared(n)) => n,
            DropOutcome::Moved | DropOutcome::Locked(LockOutcome::ToppedOut) => 0,
        }
    }
}

/// A single game: board, current and next piece, piece supply and score.
///
/// Every command follows the same two-phase protocol: compute the tentative
/// piece, validate it against the board, then commit it or discard it. A
/// rejected command leaves the session unchanged.
///
/// All commands except [`reset`](Self::reset) are rejected with
/// [`ActionError::SessionOver`] once the session is over.
///
/// # Example
///
/// ```
/// use quadris_engine::{DropOutcome, GameSession};
///
/// let mut session = GameSession::new();
/// session.try_move_left().ok();
/// session.try_rotate().ok();
///
/// let outcome = session.hard_drop().unwrap();
/// assert!(outcome.is_locked());
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Piece,
    next: Piece,
    bag: PieceBag,
    stats: GameStats,
    state: SessionState,
    seed: PieceSeed,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a session whose piece order is determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut bag = PieceBag::with_seed(seed);
        let current = Piece::new(bag.draw());
        let next = Piece::new(bag.draw());
        Self {
            board: Board::EMPTY,
            current,
            next,
            bag,
            stats: GameStats::new(),
            state: SessionState::Active,
            seed,
        }
    }

    /// Creates a session on a prepared board.
    ///
    /// The session starts over if the spawned piece does not fit the board.
    #[must_use]
    pub fn with_board(seed: PieceSeed, board: Board) -> Self {
        let mut session = Self {
            board,
            ..Self::with_seed(seed)
        };
        if !session.fits(&session.current) {
            session.state = SessionState::Over;
        }
        session
    }

    /// Restarts with an empty board, zero score and a new random seed.
    pub fn reset(&mut self) {
        self.reset_with_seed(rand::rng().random());
    }

    pub fn reset_with_seed(&mut self, seed: PieceSeed) {
        *self = Self::with_seed(seed);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns where the current piece would land with a hard drop.
    ///
    /// The current piece is not modified.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.current;
        loop {
            let lower = ghost.translated(1, 0);
            if !self.fits(&lower) {
                return ghost;
            }
            ghost = lower;
        }
    }

    #[must_use]
    pub fn ghost_cells(&self) -> [Position; 4] {
        self.ghost_piece().occupied_cells()
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        self.try_translate(0, -1)
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        self.try_translate(0, 1)
    }

    /// Moves the piece down one row, or locks it if it cannot move.
    pub fn try_soft_drop(&mut self) -> Result<DropOutcome, ActionError> {
        self.ensure_active()?;
        match self.try_translate(1, 0) {
            Ok(()) => Ok(DropOutcome::Moved),
            Err(_) => Ok(DropOutcome::Locked(self.lock())),
        }
    }

    /// Moves the piece down as far as it goes and locks it.
    pub fn hard_drop(&mut self) -> Result<DropOutcome, ActionError> {
        self.ensure_active()?;
        while self.try_translate(1, 0).is_ok() {}
        Ok(DropOutcome::Locked(self.lock()))
    }

    /// Rotates the piece one step forward.
    ///
    /// `Ok` means the rotation was accepted.
    pub fn try_rotate(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.commit(self.current.rotated_forward())
    }

    /// Exchanges the current and the next piece, position and rotation included.
    ///
    /// The swapped-in piece is not checked against the board; the next move or
    /// gravity step resolves an invalid placement.
    pub fn try_swap_with_next(&mut self) -> Result<(), ActionError> {
        self.ensure_active()?;
        std::mem::swap(&mut self.current, &mut self.next);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        if self.state.is_over() {
            return Err(ActionError::SessionOver);
        }
        Ok(())
    }

    fn fits(&self, piece: &Piece) -> bool {
        !self.board.is_colliding(piece)
    }

    fn try_translate(&mut self, delta_row: i16, delta_column: i16) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.commit(self.current.translated(delta_row, delta_column))
    }

    fn commit(&mut self, piece: Piece) -> Result<(), ActionError> {
        if !self.fits(&piece) {
            return Err(PieceCollisionError.into());
        }
        self.current = piece;
        Ok(())
    }

    fn lock(&mut self) -> LockOutcome {
        self.board.lock_piece(&self.current);
        self.current = self.next;
        self.next = Piece::new(self.bag.draw());

        if !self.fits(&self.current) {
            self.stats.complete_piece_drop(0);
            self.state = SessionState::Over;
            return LockOutcome::ToppedOut;
        }

        let cleared_lines = self.board.clear_full_rows();
        self.stats.complete_piece_drop(cleared_lines);
        LockOutcome::Cleared(cleared_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, PieceKind};

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    /// Replaces the current piece, bypassing validation.
    fn set_current(session: &mut GameSession, piece: Piece) {
        session.current = piece;
    }

    fn piece_at(kind: PieceKind, row: i16, column: i16) -> Piece {
        let mut piece = Piece::new(kind);
        let offset = piece.offset();
        piece.translate(row - offset.row(), column - offset.column());
        piece
    }

    #[test]
    fn test_new_session_is_active_and_empty() {
        let session = GameSession::with_seed(SEED);
        assert!(session.state().is_active());
        assert_eq!(session.score(), 0);
        assert_eq!(session.board(), &Board::EMPTY);
        let spawned = Piece::new(session.current_piece().kind());
        assert_eq!(session.current_piece(), &spawned);
        assert_ne!(session.current_piece().kind(), session.next_piece().kind());
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut session = GameSession::with_seed(SEED);
        set_current(&mut session, piece_at(PieceKind::O, 5, 1));

        assert!(session.try_move_left().is_ok());
        assert_eq!(session.current_piece().offset(), Position::new(5, 0));

        let before = *session.current_piece();
        assert_eq!(
            session.try_move_left(),
            Err(ActionError::Collision(PieceCollisionError))
        );
        assert_eq!(session.current_piece(), &before);
    }

    #[test]
    fn test_move_right_blocked_by_locked_cell() {
        let mut session = GameSession::with_seed(SEED);
        session.board.lock(Position::new(6, 7), PieceKind::Z);
        set_current(&mut session, piece_at(PieceKind::O, 5, 5));

        assert!(session.try_move_right().is_err());
        assert_eq!(session.current_piece().offset(), Position::new(5, 5));
    }

    #[test]
    fn test_rotate_rejected_against_wall() {
        let mut session = GameSession::with_seed(SEED);
        // Vertical I in the rightmost column: rotating back to horizontal would
        // cross the right wall.
        let mut piece = piece_at(PieceKind::I, 5, 7);
        piece.rotate_forward();
        set_current(&mut session, piece);
        assert!(session.board().fits(piece.occupied_cells()));
        assert!(piece.occupied_cells().iter().all(|p| p.column() == 9));

        assert!(session.try_rotate().is_err());
        assert_eq!(session.current_piece(), &piece);
    }

    #[test]
    fn test_rotate_accepted_in_open_space() {
        let mut session = GameSession::with_seed(SEED);
        set_current(&mut session, piece_at(PieceKind::T, 5, 4));

        assert!(session.try_rotate().is_ok());
        assert_eq!(session.current_piece().rotation().as_index(), 1);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut session = GameSession::with_seed(SEED);
        set_current(&mut session, piece_at(PieceKind::O, 17, 0));

        assert_eq!(session.try_soft_drop(), Ok(DropOutcome::Moved));
        let landed = *session.current_piece();
        let next = *session.next_piece();

        assert_eq!(
            session.try_soft_drop(),
            Ok(DropOutcome::Locked(LockOutcome::Cleared(0)))
        );
        for cell in landed.occupied_cells() {
            assert_eq!(session.board().cell(cell).map(Block::id), Some(PieceKind::O.id()));
        }
        assert_eq!(session.current_piece(), &next);
        assert_eq!(session.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_hard_drop_matches_ghost() {
        let mut session = GameSession::with_seed(SEED);
        session.board.lock(Position::new(15, 4), PieceKind::L);
        let piece = *session.current_piece();
        let ghost = session.ghost_cells();
        assert_eq!(session.current_piece(), &piece);

        assert!(session.hard_drop().unwrap().is_locked());
        for cell in ghost {
            assert!(!session.board().is_empty(cell));
        }
        assert_eq!(session.board().occupied_count(), 5);
    }

    #[test]
    fn test_single_line_clear_scores() {
        let mut session = GameSession::with_seed(SEED);
        for column in 0..8 {
            session.board.lock(Position::new(19, column), PieceKind::J);
        }
        set_current(&mut session, piece_at(PieceKind::O, 10, 8));

        let outcome = session.hard_drop().unwrap();
        assert_eq!(outcome, DropOutcome::Locked(LockOutcome::Cleared(1)));
        assert_eq!(outcome.cleared_lines(), 1);
        assert_eq!(session.score(), 100);
        // Only the top half of the O remains, dropped into the bottom row.
        assert_eq!(session.board().occupied_count(), 2);
        assert!(!session.board().is_empty(Position::new(19, 8)));
        assert!(!session.board().is_empty(Position::new(19, 9)));
    }

    #[test]
    fn test_swap_exchanges_pieces() {
        let mut session = GameSession::with_seed(SEED);
        session.try_move_left().ok();
        let current = *session.current_piece();
        let next = *session.next_piece();

        assert!(session.try_swap_with_next().is_ok());
        assert_eq!(session.current_piece(), &next);
        assert_eq!(session.next_piece(), &current);
    }

    #[test]
    fn test_swapped_piece_overlapping_is_locked_by_gravity() {
        let mut session = GameSession::with_seed(SEED);
        let mut next = Piece::new(PieceKind::O);
        next.translate(18, 0);
        session.next = next;
        // Occupy one of the cells the swapped-in piece covers.
        session.board.lock(Position::new(19, 4), PieceKind::T);

        session.try_swap_with_next().unwrap();
        assert!(session.board().is_colliding(session.current_piece()));
        assert!(session.try_move_left().is_err());

        let outcome = session.try_soft_drop().unwrap();
        assert!(outcome.is_locked());
        assert_eq!(
            session.board().cell(Position::new(19, 4)).map(Block::id),
            Some(PieceKind::O.id())
        );
    }

    #[test]
    fn test_commands_rejected_when_over() {
        let mut session = GameSession::with_seed(SEED);
        session.state = SessionState::Over;
        let before = *session.current_piece();

        assert_eq!(session.try_move_left(), Err(ActionError::SessionOver));
        assert_eq!(session.try_move_right(), Err(ActionError::SessionOver));
        assert_eq!(session.try_soft_drop(), Err(ActionError::SessionOver));
        assert_eq!(session.hard_drop(), Err(ActionError::SessionOver));
        assert_eq!(session.try_rotate(), Err(ActionError::SessionOver));
        assert_eq!(session.try_swap_with_next(), Err(ActionError::SessionOver));
        assert_eq!(session.current_piece(), &before);
        assert_eq!(session.stats().completed_pieces(), 0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = GameSession::with_seed(SEED);
        session.hard_drop().unwrap();
        session.state = SessionState::Over;

        session.reset_with_seed(SEED);
        let fresh = GameSession::with_seed(SEED);
        assert!(session.state().is_active());
        assert_eq!(session.board(), fresh.board());
        assert_eq!(session.stats(), fresh.stats());
        assert_eq!(session.current_piece(), fresh.current_piece());
        assert_eq!(session.next_piece(), fresh.next_piece());
    }

    #[test]
    fn test_with_board_checks_spawned_piece() {
        let mut open = Board::EMPTY;
        open.lock(Position::new(19, 0), PieceKind::J);
        assert!(GameSession::with_board(SEED, open).state().is_active());

        let spawn = GameSession::with_seed(SEED).current_piece().occupied_cells();
        let mut blocked = Board::EMPTY;
        blocked.lock(spawn[0], PieceKind::J);
        let session = GameSession::with_board(SEED, blocked);
        assert!(session.is_over());
        assert_eq!(session.stats().completed_pieces(), 0);
    }
}
