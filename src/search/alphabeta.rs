//! Minimax search with alpha-beta pruning
//!
//! The searcher owns one scratch board per call chain and explores
//! children strictly sequentially, mutating the board before each
//! recursive descent and undoing unconditionally on every exit path —
//! including pruning breaks. Candidates are recomputed at every node;
//! no transposition cache is kept. Pruning never changes the chosen
//! root move or score versus exhaustive minimax over the same
//! candidates, it only skips siblings that cannot matter.

use crate::board::{Board, Mark, Pos};
use crate::eval::{evaluate_board, evaluate_position, PlayStyle};
use crate::rules::{check_win_at, is_blocking_threat, is_winning_threat};

/// Score of a won game (before the depth bias)
pub const WIN_SCORE: i32 = 1_000_000;
/// Score of a lost game (before the depth bias)
pub const LOSE_SCORE: i32 = -1_000_000;

/// Candidates only come from cells with a stone within this Chebyshev
/// distance — winning patterns are always built adjacent to existing
/// stones.
const CANDIDATE_RADIUS: i32 = 2;

/// Diagnostics from one search call. Side output for display and
/// telemetry, never consulted by game logic.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ThinkingStats {
    /// Minimax nodes visited
    pub nodes_evaluated: u64,
    /// Sibling sets cut off by alpha-beta
    pub prune_count: u64,
    /// Deepest ply reached below the root
    pub max_depth_reached: u8,
    /// Wall-clock time of the whole call, in milliseconds
    pub elapsed_ms: u64,
}

/// Minimax searcher for one AI identity.
///
/// Configuration is fixed for the duration of a search call; the engine
/// recreates or reconfigures the searcher between calls.
pub struct Searcher {
    ai: Mark,
    opponent: Mark,
    style: PlayStyle,
    max_candidates: usize,
    root_depth: u8,
    stats: ThinkingStats,
}

impl Searcher {
    #[must_use]
    pub fn new(ai: Mark, style: PlayStyle, max_candidates: usize) -> Self {
        Self {
            ai,
            opponent: ai.opponent(),
            style,
            max_candidates,
            root_depth: 0,
            stats: ThinkingStats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> &ThinkingStats {
        &self.stats
    }

    /// Search the position to `depth` plies and return the best move
    /// with its score, or `None` when no candidates exist.
    ///
    /// Ties keep the first-seen candidate, so the best-first ordering
    /// decides between equal scores.
    pub fn search_root(&mut self, board: &mut Board, depth: u8) -> Option<(Pos, i32)> {
        let depth = depth.max(1);
        self.root_depth = depth;

        let candidates = self.ordered_candidates(board);
        let mut best: Option<(Pos, i32)> = None;

        for pos in candidates {
            board.make_move(pos.row as i32, pos.col as i32, self.ai);
            let score = self.minimax(board, depth - 1, false, i32::MIN, i32::MAX, pos);
            board.undo_last_move();

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((pos, score));
            }
        }

        best
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// Terminal checks, in order: the last applied move wins for its
    /// mover (scored with a depth bias so the search prefers winning
    /// sooner and losing later), then the depth floor, then candidate
    /// exhaustion — both of the latter fall back to the static
    /// evaluation.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        last: Pos,
    ) -> i32 {
        self.stats.nodes_evaluated += 1;
        let ply = self.root_depth - depth;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(ply);

        let last_mark = board.grid().get(last);
        if check_win_at(board.grid(), last, last_mark) {
            return if last_mark == self.ai {
                WIN_SCORE + depth as i32
            } else {
                LOSE_SCORE - depth as i32
            };
        }

        if depth == 0 {
            return evaluate_board(board, self.ai, self.style);
        }

        let moves = self.ordered_candidates(board);
        if moves.is_empty() {
            return evaluate_board(board, self.ai, self.style);
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for pos in moves {
                board.make_move(pos.row as i32, pos.col as i32, self.ai);
                let eval = self.minimax(board, depth - 1, false, alpha, beta, pos);
                board.undo_last_move();

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    self.stats.prune_count += 1;
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for pos in moves {
                board.make_move(pos.row as i32, pos.col as i32, self.opponent);
                let eval = self.minimax(board, depth - 1, true, alpha, beta, pos);
                board.undo_last_move();

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    self.stats.prune_count += 1;
                    break;
                }
            }
            min_eval
        }
    }

    /// Candidates for the side to move, best-first.
    ///
    /// Ordering by the cheap single-ply score makes alpha-beta cut
    /// early; the sort is stable so equal scores keep generation order.
    pub(crate) fn ordered_candidates(&self, board: &Board) -> Vec<Pos> {
        let grid = board.grid();
        let mut moves = self.generate_candidates(board);
        let mut scored: Vec<(Pos, i32)> = moves
            .drain(..)
            .map(|pos| (pos, evaluate_position(grid, pos, self.ai)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(pos, _)| pos).collect()
    }

    /// Bounded candidate set: tactically critical cells first (they
    /// complete a five or block one), then the radius-2 neighborhood of
    /// the stones, deduplicated and truncated to the configured cap.
    ///
    /// Stones are visited in sorted order and each empty cell at most
    /// once, so candidate generation — and with it the whole search —
    /// is deterministic.
    fn generate_candidates(&self, board: &Board) -> Vec<Pos> {
        let grid = board.grid();
        let size = board.size();

        let mut stones: Vec<Pos> = board.occupied_cells().collect();
        stones.sort_unstable();

        let mut seen = vec![false; size * size];
        let mut critical = Vec::new();
        let mut nearby = Vec::new();

        for stone in stones {
            for pos in board.neighbor_cells(stone.row as i32, stone.col as i32, CANDIDATE_RADIUS)
            {
                let idx = pos.to_index(size);
                if seen[idx] {
                    continue;
                }
                seen[idx] = true;

                if is_winning_threat(grid, pos, self.ai)
                    || is_blocking_threat(grid, pos, self.ai)
                {
                    critical.push(pos);
                } else {
                    nearby.push(pos);
                }
            }
        }

        critical.extend(nearby);
        critical.truncate(self.max_candidates);
        critical
    }
}
