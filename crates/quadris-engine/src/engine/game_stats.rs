use serde::{Deserialize, Serialize};

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared by a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: sum of the per-lock line clear points
/// - **Level**: total lines cleared / 10 (display only, scoring ignores it)
/// - **Completed pieces**: number of locked pieces
/// - **Line clear distribution**: count of locks by number of lines cleared
///
/// # Example
///
/// ```
/// use quadris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(1);
/// stats.complete_piece_drop(1);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[1], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    /// Points awarded for clearing `cleared_lines` rows with one lock.
    #[must_use]
    pub const fn score_for(cleared_lines: usize) -> usize {
        if cleared_lines < SCORE_TABLE.len() {
            SCORE_TABLE[cleared_lines]
        } else {
            0
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / 10
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// `[0]` counts locks that cleared nothing, `[4]` counts four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records one locked piece and the rows it cleared.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += Self::score_for(cleared_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let expected = [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)];
        for (lines, points) in expected {
            let mut stats = GameStats::new();
            stats.complete_piece_drop(lines);
            assert_eq!(stats.score(), points, "{lines} lines");
        }
    }

    #[test]
    fn test_score_accumulates() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(1);
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(3);
        stats.complete_piece_drop(2);

        assert_eq!(stats.score(), 900);
        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.total_cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 1, 1, 0]);
    }

    #[test]
    fn test_level_follows_lines() {
        let mut stats = GameStats::new();
        for _ in 0..3 {
            stats.complete_piece_drop(4);
        }
        assert_eq!(stats.total_cleared_lines(), 12);
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn test_out_of_table_clear_scores_nothing() {
        assert_eq!(GameStats::score_for(5), 0);
        let mut stats = GameStats::new();
        stats.complete_piece_drop(5);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.total_cleared_lines(), 5);
        assert_eq!(stats.line_cleared_counter().iter().sum::<usize>(), 0);
    }

    #[test]
    fn test_serialization() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"score":300,"completed_pieces":1,"total_cleared_lines":2,"line_cleared_counter":[0,0,1,0,0]}"#
        );
        let back: GameStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
