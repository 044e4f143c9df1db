pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding at requested placement")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("game is over, reset to play again")]
pub struct GameOverError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MoveError {
    #[display("piece cannot move: {_0}")]
    PieceCollision(PieceCollisionError),
    #[display("piece cannot move: {_0}")]
    GameOver(GameOverError),
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("cell ({x}, {y}) is outside the court")]
pub struct CellOutOfCourtError {
    pub x: i32,
    pub y: i32,
}
