use tracing::{debug, info};

use crate::{
    GameOverError, MoveError, PieceCollisionError,
    core::{
        court::{Cell, Court},
        piece::{Piece, PieceKind},
    },
};

use super::{
    game_stats::GameStats,
    piece_source::{PieceSeed, PieceSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlayState {
    Playing,
    /// A freshly spawned piece collided. Only [`GameState::reset`] leaves it.
    Lost,
}

/// Direction of a single-cell translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }
}

/// Result of a successful [`GameState::drop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down by one row.
    Fell,
    /// The piece settled and the next piece spawned.
    Settled { cleared_lines: usize },
    /// The piece settled and the next piece collided at spawn.
    ToppedOut { cleared_lines: usize },
}

impl DropOutcome {
    #[must_use]
    pub const fn cleared_lines(self) -> usize {
        match self {
            Self::Fell => 0,
            Self::Settled { cleared_lines } | Self::ToppedOut { cleared_lines } => cleared_lines,
        }
    }
}

/// The game state machine.
///
/// Owns the court, the current and next pieces, the score and the random
/// piece source. All transitions go through `&mut self`.
///
/// # Example
///
/// ```
/// use picotris_engine::{Direction, DropOutcome, GameState};
///
/// let mut game = GameState::new();
/// assert!(game.is_playing());
///
/// game.try_move(Direction::Left).ok();
/// game.try_rotate().ok();
///
/// let outcome = game.drop().unwrap();
/// assert_eq!(outcome, DropOutcome::Fell);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    court: Court,
    current: Piece,
    next: PieceKind,
    stats: GameStats,
    play_state: PlayState,
    piece_source: PieceSource,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starts a game with a randomly seeded piece source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_piece_source(PieceSource::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_piece_source(PieceSource::with_seed(seed))
    }

    fn with_piece_source(mut piece_source: PieceSource) -> Self {
        let current = Piece::new(piece_source.draw());
        let next = piece_source.draw();
        Self {
            court: Court::EMPTY,
            current,
            next,
            stats: GameStats::new(),
            play_state: PlayState::Playing,
            piece_source,
        }
    }

    /// Clears the court and the score and spawns fresh pieces.
    ///
    /// The piece source keeps its position, so a reset game continues the
    /// same random sequence.
    pub fn reset(&mut self) {
        self.court.clear_all();
        self.stats = GameStats::new();
        self.play_state = PlayState::Playing;
        self.current = Piece::new(self.piece_source.draw());
        self.next = self.piece_source.draw();
        info!(current = %self.current, next = %self.next.as_char(), "game reset");
    }

    #[must_use]
    pub fn court(&self) -> &Court {
        &self.court
    }

    /// Returns the settled cell at `(x, y)`. The current piece is not included.
    #[must_use]
    pub fn get_block(&self, x: i32, y: i32) -> Cell {
        self.court.get(x, y)
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
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
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.play_state.is_playing()
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.play_state.is_lost()
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.piece_source.seed()
    }

    /// Number of pieces drawn from the piece source since the game was created.
    #[must_use]
    pub fn drawn_pieces(&self) -> usize {
        self.piece_source.drawn()
    }

    fn ensure_playing(&self) -> Result<(), GameOverError> {
        match self.play_state {
            PlayState::Playing => Ok(()),
            PlayState::Lost => Err(GameOverError),
        }
    }

    /// Replaces the current piece if the new placement is free.
    pub fn set_current_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.court.is_occupied(&piece) {
            return Err(PieceCollisionError);
        }
        self.current = piece;
        Ok(())
    }

    pub fn try_move(&mut self, direction: Direction) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let (dx, dy) = direction.delta();
        let candidate = self.current.shifted(dx, dy);
        self.set_current_piece(candidate).inspect_err(|_| {
            debug!(piece = %self.current, ?direction, "move rejected");
        })?;
        Ok(())
    }

    /// Rotates the current piece a quarter turn in place. There are no wall
    /// kicks: a blocked rotation is rejected.
    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let candidate = self.current.rotated_right();
        self.set_current_piece(candidate).inspect_err(|_| {
            debug!(piece = %self.current, "rotation rejected");
        })?;
        Ok(())
    }

    /// Moves the current piece down, or settles it when it cannot move.
    ///
    /// Settling awards the settle score, bakes the piece into the court,
    /// removes complete rows, promotes the next piece and draws a new one.
    /// When the promoted piece collides at spawn the game is lost.
    pub fn drop(&mut self) -> Result<DropOutcome, GameOverError> {
        self.ensure_playing()?;
        let candidate = self.current.shifted(0, 1);
        if self.court.is_unoccupied(&candidate) {
            self.current = candidate;
            return Ok(DropOutcome::Fell);
        }

        self.stats.record_settle();
        self.court.fill_piece(&self.current);
        let cleared_lines = self.court.remove_complete_rows();
        self.stats.record_cleared_rows(cleared_lines);
        if cleared_lines > 0 {
            info!(cleared_lines, score = self.stats.score(), "rows cleared");
        }

        self.current = Piece::new(self.next);
        self.next = self.piece_source.draw();
        debug!(current = %self.current, next = %self.next.as_char(), "new piece");

        if self.court.is_occupied(&self.current) {
            self.play_state = PlayState::Lost;
            info!(
                score = self.stats.score(),
                settled_pieces = self.stats.settled_pieces(),
                "game over"
            );
            return Ok(DropOutcome::ToppedOut { cleared_lines });
        }
        Ok(DropOutcome::Settled { cleared_lines })
    }

    /// Removes complete rows from the court and awards their score.
    ///
    /// [`Self::drop`] already does this once per settle, so a further call
    /// finds nothing to remove and returns 0.
    pub fn clear_complete_rows(&mut self) -> usize {
        let cleared_lines = self.court.remove_complete_rows();
        if cleared_lines > 0 {
            self.stats.record_cleared_rows(cleared_lines);
            info!(cleared_lines, score = self.stats.score(), "rows cleared");
        }
        cleared_lines
    }
}
