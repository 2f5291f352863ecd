//! AI engine integrating the search components
//!
//! The engine answers "where should the computer play" with a priority
//! pipeline:
//!
//! 1. **Opening**: an empty board gets the center without any search
//! 2. **Immediate win**: any cell that completes five right now
//! 3. **Block**: any cell the opponent would win at next move
//! 4. **Alpha-beta**: bounded minimax over ordered candidates
//! 5. **Fallback**: a random legal move when no candidates exist
//!
//! The caller's grid is never written; each call builds one scratch
//! board and mutates only that.

use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Grid, Mark, Pos};
use crate::eval::PlayStyle;
use crate::rules::is_winning_threat;
use crate::search::{Searcher, ThinkingStats, WIN_SCORE};

/// Fixed score for the opening center move
const OPENING_SCORE: i32 = 1_000;
/// Sentinel score for a forced block
const BLOCK_SCORE: i32 = WIN_SCORE - 1;

/// Search strength. Each level fixes the depth bound and the candidate
/// cap for one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Search depth bound in plies
    #[inline]
    pub fn max_depth(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    /// Candidate cap per node
    #[inline]
    pub fn max_candidates(self) -> usize {
        match self {
            Difficulty::Beginner => 8,
            Difficulty::Easy => 12,
            Difficulty::Medium => 16,
            Difficulty::Hard => 20,
            Difficulty::Expert => 25,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(format!("unknown difficulty `{s}`")),
        }
    }
}

/// Which phase of the pipeline produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Center move on an empty board
    Opening,
    /// A move completing five right now
    ImmediateWin,
    /// A move denying the opponent an immediate five
    Block,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Random legal move, no candidates existed
    Fallback,
    /// No legal move at all (full grid or unconfigured player)
    NoMove,
}

/// Result of a move search.
///
/// `best_move: None` is the sentinel the caller must check before
/// applying the move to a board.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MoveResult {
    pub best_move: Option<Pos>,
    pub score: i32,
    pub search_type: SearchType,
    pub stats: ThinkingStats,
}

/// Computer opponent.
///
/// Configuration (players, difficulty, style, optional time budget) is
/// mutable between calls and fixed during one. The randomness source is
/// explicit and seedable so search outcomes are reproducible except
/// where the fallback deliberately randomizes.
pub struct AIEngine {
    ai: Mark,
    opponent: Mark,
    difficulty: Difficulty,
    style: PlayStyle,
    time_limit: Option<Duration>,
    rng: SmallRng,
    last_stats: ThinkingStats,
}

impl AIEngine {
    #[must_use]
    pub fn new(ai: Mark, difficulty: Difficulty, style: PlayStyle) -> Self {
        Self {
            ai,
            opponent: ai.opponent(),
            difficulty,
            style,
            time_limit: None,
            rng: SmallRng::from_entropy(),
            last_stats: ThinkingStats::default(),
        }
    }

    /// Engine with a fixed RNG seed, for reproducible games and tests.
    #[must_use]
    pub fn with_seed(ai: Mark, difficulty: Difficulty, style: PlayStyle, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            ..Self::new(ai, difficulty, style)
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_play_style(&mut self, style: PlayStyle) {
        self.style = style;
    }

    /// Set which mark the engine plays; the opponent is the complement.
    pub fn set_players(&mut self, ai: Mark) {
        self.ai = ai;
        self.opponent = ai.opponent();
    }

    /// Wall-clock budget applied to every `find_best_move` call, or
    /// `None` for fixed-depth search.
    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn play_style(&self) -> PlayStyle {
        self.style
    }

    #[must_use]
    pub fn ai_player(&self) -> Mark {
        self.ai
    }

    /// Diagnostics from the most recent search call.
    #[must_use]
    pub fn last_stats(&self) -> &ThinkingStats {
        &self.last_stats
    }

    /// Compute the engine's move for the given position.
    ///
    /// Uses the configured time budget when one is set, otherwise a
    /// single fixed-depth search at the difficulty's depth bound.
    pub fn find_best_move(&mut self, grid: &Grid) -> MoveResult {
        self.search(grid, self.time_limit)
    }

    /// Compute the engine's move under an explicit wall-clock budget.
    ///
    /// Runs iterative deepening and checks the clock only between whole
    /// depth iterations; the deepest completed result is returned.
    pub fn find_best_move_timed(&mut self, grid: &Grid, budget: Duration) -> MoveResult {
        self.search(grid, Some(budget))
    }

    fn search(&mut self, grid: &Grid, budget: Option<Duration>) -> MoveResult {
        let start = Instant::now();

        if !self.ai.is_player() || grid.is_full() {
            return self.finish(start, None, 0, SearchType::NoMove, ThinkingStats::default());
        }

        if grid.is_empty() {
            return self.finish(
                start,
                Some(grid.center()),
                OPENING_SCORE,
                SearchType::Opening,
                ThinkingStats::default(),
            );
        }

        // Forced tactics short-circuit the search: take a win if one
        // exists, else block the opponent's.
        let empties = grid.empty_cells();
        for &pos in &empties {
            if is_winning_threat(grid, pos, self.ai) {
                return self.finish(
                    start,
                    Some(pos),
                    WIN_SCORE,
                    SearchType::ImmediateWin,
                    ThinkingStats::default(),
                );
            }
        }
        for &pos in &empties {
            if is_winning_threat(grid, pos, self.opponent) {
                return self.finish(
                    start,
                    Some(pos),
                    BLOCK_SCORE,
                    SearchType::Block,
                    ThinkingStats::default(),
                );
            }
        }

        let max_depth = self.difficulty.max_depth();
        let mut scratch = Board::from_grid(grid);
        let mut searcher = Searcher::new(self.ai, self.style, self.difficulty.max_candidates());

        let mut best: Option<(Pos, i32)> = None;
        let first_depth = if budget.is_some() { 1 } else { max_depth };
        for depth in first_depth..=max_depth {
            if let Some(budget) = budget {
                if best.is_some() && start.elapsed() >= budget {
                    break;
                }
            }
            match searcher.search_root(&mut scratch, depth) {
                Some(result) => best = Some(result),
                None => break,
            }
        }

        let stats = searcher.stats().clone();
        match best {
            Some((pos, score)) => {
                self.finish(start, Some(pos), score, SearchType::AlphaBeta, stats)
            }
            None => {
                // candidate generation came up empty; any legal move
                let pos = empties[self.rng.gen_range(0..empties.len())];
                self.finish(start, Some(pos), 0, SearchType::Fallback, stats)
            }
        }
    }

    fn finish(
        &mut self,
        start: Instant,
        best_move: Option<Pos>,
        score: i32,
        search_type: SearchType,
        mut stats: ThinkingStats,
    ) -> MoveResult {
        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        self.last_stats = stats.clone();
        MoveResult {
            best_move,
            score,
            search_type,
            stats,
        }
    }
}
