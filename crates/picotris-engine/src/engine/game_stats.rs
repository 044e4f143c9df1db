use serde::Serialize;

/// Points awarded every time a piece settles.
pub const SETTLE_SCORE: usize = 10;

/// Points for clearing a single row; each extra simultaneous row doubles it.
pub const LINE_CLEAR_BASE_SCORE: usize = 100;

/// Returns the points for clearing `rows` rows with one settle.
///
/// `100 * 2^(rows - 1)`: 1 → 100, 2 → 200, 3 → 400, 4 → 800.
///
/// ```
/// use picotris_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(3), 400);
/// ```
#[must_use]
pub const fn line_clear_score(rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    LINE_CLEAR_BASE_SCORE << (rows - 1)
}

/// Score and counters of a single game.
///
/// Reset together with the court. The score never decreases between resets.
///
/// ```
/// use picotris_engine::{GameState, GameStats, SETTLE_SCORE};
///
/// let mut game = GameState::new();
/// assert_eq!(game.stats(), &GameStats::new());
///
/// // pieces stacked at the spawn columns never complete a row
/// while game.is_playing() {
///     game.drop().unwrap();
/// }
/// let stats = game.stats();
/// assert_eq!(stats.score(), SETTLE_SCORE * stats.settled_pieces());
/// assert_eq!(stats.total_cleared_lines(), 0);
/// assert_eq!(stats.line_cleared_counter()[0], stats.settled_pieces());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    settled_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            settled_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn settled_pieces(&self) -> usize {
        self.settled_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of settles by number of rows cleared (index 0-4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    pub(crate) const fn record_settle(&mut self) {
        self.settled_pieces += 1;
        self.score += SETTLE_SCORE;
    }

    /// Adds the line-clear award for `rows` rows removed by one settle.
    pub(crate) const fn record_cleared_rows(&mut self, rows: usize) {
        if rows < self.line_cleared_counter.len() {
            self.line_cleared_counter[rows] += 1;
        }
        self.total_cleared_lines += rows;
        self.score += line_clear_score(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 200);
        assert_eq!(line_clear_score(3), 400);
        assert_eq!(line_clear_score(4), 800);
    }

    #[test]
    fn test_settle_adds_fixed_award() {
        let mut stats = GameStats::new();
        stats.record_settle();
        stats.record_settle();
        assert_eq!(stats.score(), 2 * SETTLE_SCORE);
        assert_eq!(stats.settled_pieces(), 2);
    }

    #[test]
    fn test_cleared_rows_counters() {
        let mut stats = GameStats::new();
        stats.record_cleared_rows(0);
        stats.record_cleared_rows(1);
        stats.record_cleared_rows(4);
        assert_eq!(stats.score(), 900);
        assert_eq!(stats.total_cleared_lines(), 5);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 0, 0, 1]);
    }
}
