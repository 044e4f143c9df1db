use crate::MoveError;

use super::{
    game_state::{Direction, DropOutcome, GameState},
    piece_source::PieceSeed,
};

/// An action requested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    MoveLeft,
    MoveRight,
    Rotate,
    /// Manual one-row drop.
    Drop,
}

impl PlayerInput {
    /// Whether this input starts a new game when the current one is lost.
    #[must_use]
    pub const fn restarts_lost_game(self) -> bool {
        matches!(self, Self::MoveLeft | Self::MoveRight | Self::Rotate)
    }
}

/// A run of games driven by player input and a periodic drop tick.
///
/// When the game is lost, moving or rotating starts a new game and is then
/// applied to it. A manual drop and the periodic drop tick never restart a
/// lost game.
///
/// # Example
///
/// ```
/// use picotris_engine::{GameSession, PlayerInput};
///
/// let mut session = GameSession::new();
/// session.handle_input(PlayerInput::MoveLeft).ok();
/// let outcome = session.drop_tick();
/// assert!(outcome.is_some());
/// assert_eq!(session.games_started(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    game: GameState,
    games_started: usize,
    drop_ticks: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::from_game(GameState::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_game(GameState::with_seed(seed))
    }

    #[must_use]
    pub fn from_game(game: GameState) -> Self {
        Self {
            game,
            games_started: 1,
            drop_ticks: 0,
        }
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Number of games played in this session, including the current one.
    #[must_use]
    pub fn games_started(&self) -> usize {
        self.games_started
    }

    /// Number of drop ticks that reached a running game.
    #[must_use]
    pub fn drop_ticks(&self) -> u64 {
        self.drop_ticks
    }

    pub fn restart(&mut self) {
        self.game.reset();
        self.games_started += 1;
    }

    pub fn handle_input(&mut self, input: PlayerInput) -> Result<(), MoveError> {
        if self.game.is_lost() && input.restarts_lost_game() {
            self.restart();
        }
        match input {
            PlayerInput::MoveLeft => self.game.try_move(Direction::Left),
            PlayerInput::MoveRight => self.game.try_move(Direction::Right),
            PlayerInput::Rotate => self.game.try_rotate(),
            PlayerInput::Drop => {
                self.game.drop()?;
                Ok(())
            }
        }
    }

    /// Drops the current piece by one step if the game is running.
    ///
    /// Returns `None` while the game is lost.
    pub fn drop_tick(&mut self) -> Option<DropOutcome> {
        if self.game.is_lost() {
            return None;
        }
        self.drop_ticks += 1;
        self.game.drop().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Piece, PieceKind};

    fn lost_session() -> GameSession {
        let mut game = GameState::with_seed(PieceSeed::from_bytes([3; 16]));
        // stack pieces at the spawn column until one collides
        while game.is_playing() {
            game.drop().unwrap();
        }
        GameSession::from_game(game)
    }

    #[test]
    fn test_inputs_reach_running_game() {
        let mut session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        let start = *session.game().current_piece();

        session.handle_input(PlayerInput::MoveRight).unwrap();
        session.handle_input(PlayerInput::Drop).unwrap();

        assert_eq!(session.game().current_piece(), &start.shifted(1, 1));
        assert_eq!(session.games_started(), 1);
    }

    #[test]
    fn test_drop_tick_moves_running_game() {
        let mut session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        assert_eq!(session.drop_tick(), Some(DropOutcome::Fell));
        assert_eq!(session.drop_ticks(), 1);
        assert_eq!(session.game().current_piece().y(), 1);
    }

    #[test]
    fn test_move_and_rotate_restart_lost_game() {
        for input in [
            PlayerInput::MoveLeft,
            PlayerInput::MoveRight,
            PlayerInput::Rotate,
        ] {
            let mut session = lost_session();
            assert!(session.game().is_lost());

            session.handle_input(input).unwrap();

            assert!(session.game().is_playing(), "{input:?}");
            assert_eq!(session.game().score(), 0);
            assert_eq!(session.game().court().filled_count(), 0);
            assert_eq!(session.games_started(), 2);
        }
    }

    #[test]
    fn test_restart_applies_the_input() {
        let mut session = lost_session();
        session.handle_input(PlayerInput::MoveLeft).unwrap();
        let next_game_spawn = Piece::new(session.game().current_piece().kind());
        assert_eq!(session.game().current_piece(), &next_game_spawn.shifted(-1, 0));
    }

    #[test]
    fn test_manual_drop_does_not_restart() {
        let mut session = lost_session();
        let score = session.game().score();

        let err = session.handle_input(PlayerInput::Drop).unwrap_err();

        assert!(matches!(err, MoveError::GameOver(_)));
        assert!(session.game().is_lost());
        assert_eq!(session.game().score(), score);
        assert_eq!(session.games_started(), 1);
    }

    #[test]
    fn test_drop_tick_does_not_restart() {
        let mut session = lost_session();
        let court = session.game().court().clone();

        assert_eq!(session.drop_tick(), None);
        assert_eq!(session.drop_tick(), None);

        assert!(session.game().is_lost());
        assert_eq!(session.game().court(), &court);
        assert_eq!(session.drop_ticks(), 0);
    }

    #[test]
    fn test_restart_keeps_session_counters() {
        let mut session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        session.drop_tick();
        session.restart();
        assert_eq!(session.games_started(), 2);
        assert_eq!(session.drop_ticks(), 1);
        assert_eq!(session.game().get_block(0, 0), Cell::Empty);
        assert!(PieceKind::ALL.contains(&session.game().next_piece()));
    }
}
