//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameState`] - The state machine (court, current and next piece, score,
//!   playing or lost)
//! - [`GameSession`] - Input and drop-tick rules on top of [`GameState`],
//!   including the restart of a lost game
//! - [`GameStats`] - Score and line-clear counters
//! - [`PieceSource`] - Uniform random piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`] (or a [`GameSession`] around one)
//! 2. Move and rotate the current piece
//! 3. Call [`GameState::drop`] periodically; when the piece cannot fall any
//!    further it settles, complete rows are removed and the next piece spawns
//! 4. When the new piece collides at spawn the game is lost until reset
//!
//! # Example
//!
//! ```
//! use picotris_engine::{Direction, GameState};
//!
//! let mut game = GameState::new();
//!
//! game.try_move(Direction::Right).ok();
//! game.try_rotate().ok();
//!
//! while game.is_playing() {
//!     game.drop().unwrap();
//! }
//! assert!(game.score() > 0);
//! ```

pub use self::{game_state::*, game_stats::*, piece_source::*, session::*};

mod game_state;
mod game_stats;
mod piece_source;
mod session;
