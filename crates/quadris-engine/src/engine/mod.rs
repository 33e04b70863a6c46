//! Game rules on top of the core board and piece types.
//!
//! A [`GameSession`] owns the board, the falling piece, the next piece and the
//! score. Each user command either applies in full or is rejected without any
//! change. Landing a piece goes through a fixed sequence:
//!
//! 1. the current piece's cells are written into the board
//! 2. the next piece is promoted and a new one is drawn from the [`PieceBag`]
//! 3. if the promoted piece does not fit, the session is over
//! 4. otherwise full rows are cleared and scored through [`GameStats`]
//!
//! Time is not part of the session. The presentation loop drives automatic
//! drops with a [`GravityTimer`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use quadris_engine::{GameSession, GravityTimer, PieceSeed};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
//! let mut gravity = GravityTimer::new();
//!
//! while !session.is_over() {
//!     if gravity.advance(Duration::from_millis(800), session.score()) {
//!         session.try_soft_drop().unwrap();
//!     }
//! }
//! assert!(session.stats().completed_pieces() > 0);
//! ```

pub use self::{game_session::*, game_stats::*, gravity::*, piece_bag::*};

mod game_session;
mod game_stats;
mod gravity;
mod piece_bag;
