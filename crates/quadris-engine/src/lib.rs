pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece is outside the board or colliding with locked blocks")]
pub struct PieceCollisionError;

/// Reason a player command was rejected.
///
/// A rejected command never changes the session state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ActionError {
    #[display("{_0}")]
    Collision(PieceCollisionError),
    #[display("session is over")]
    SessionOver,
}
